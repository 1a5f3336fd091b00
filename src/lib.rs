//! # tocsmith
//!
//! A table-of-contents toolkit for static sites.
//!
//! tocsmith scans rendered HTML pages for their heading structure, computes a
//! numbered outline with stable anchor identifiers, and applies it back to
//! the markup: ids on headings, an inline TOC box at the top of the content
//! region, and a mirrored list in the page's sidebar. A deterministic
//! scroll-spy maps scroll positions to the active outline entry, and a small
//! corpus search covers the site's page summaries.
//!
//! ## Example
//!
//! ```rust
//! use tocsmith::outline::Outline;
//! use tocsmith::scanner;
//!
//! let html = r#"
//! <article>
//! <h1>Introduction</h1>
//! <h2>Background</h2>
//! <h2>Methodology</h2>
//! </article>
//! "#;
//!
//! let page = scanner::scan_html(html.to_string());
//! let outline = Outline::build(&page.headings, 2);
//! assert_eq!(outline.len(), 3);
//! assert_eq!(outline.entries[0].id, "section-1");
//!
//! // Render the nesting structure
//! for node in outline.tree() {
//!     print!("{}", node.render_box_tree("", true));
//! }
//! ```

/// Configuration module for persisting user preferences.
///
/// Covers TOC injection options, scroll-spy geometry and TUI settings.
pub mod config;

/// Heading outline: numbering, identifiers and nesting.
pub mod outline;

/// TOC markup generation and page rewriting.
pub mod render;

/// HTML page scanning: content region and heading extraction.
pub mod scanner;

/// Substring search over the site's page-summary corpus.
pub mod search;

/// Deterministic scroll position to active entry mapping.
pub mod spy;

/// TUI module for the interactive preview.
///
/// Provides the App and UI rendering for the dual-pane outline/content
/// viewer.
pub mod tui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use outline::{Outline, OutlineEntry};
pub use scanner::{Heading, Page, scan_file, scan_html};
pub use search::Corpus;
pub use spy::{ScrollSpy, SpyConfig};
pub use tui::App;
