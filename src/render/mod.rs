//! TOC markup rendering and page injection.
//!
//! [`markup`] is pure string building from an [`crate::outline::Outline`];
//! [`rewrite`] applies the result to page sources.

pub mod markup;
pub mod rewrite;

pub use markup::{render_inline_box, render_items, render_list};
pub use rewrite::{inject_file, inject_page};
