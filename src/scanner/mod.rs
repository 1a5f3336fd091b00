//! Heading scanning over rendered HTML pages.
//!
//! Locates the main content region and extracts `<h1>`–`<h3>` elements with
//! their byte offsets and pre-existing identifiers. Scanning is read-only;
//! identifier assignment happens in [`crate::outline`] and markup changes in
//! [`crate::render`].

pub mod html;
pub mod page;
pub mod utils;

pub use html::{find_content_region, scan_headings};
pub use page::{Heading, Page, Region};

use std::path::Path;

/// Scan a rendered HTML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn scan_file(path: &Path) -> std::io::Result<Page> {
    let html = std::fs::read_to_string(path)?;
    Ok(scan_html(html))
}

/// Scan rendered HTML content.
///
/// Headings are taken from the content region when one exists (`<article>`,
/// then `<main>`); without one the whole input is scanned so read-only
/// listings still work on bare fragments.
pub fn scan_html(html: String) -> Page {
    let region = find_content_region(&html);
    let range = match region {
        Some(r) => r.body_start..r.body_end,
        None => 0..html.len(),
    };
    let headings = scan_headings(&html, range);
    Page::new(html, region, headings)
}
