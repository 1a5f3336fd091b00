//! Applying an outline back onto page markup.
//!
//! The transform writes synthesized `id` attributes onto their headings,
//! inserts the inline TOC box at the top of the content region, and mirrors
//! the list into a sidebar container when one exists. Pages that cannot take
//! the transform (no content region, short outline) pass through unchanged.

use crate::outline::Outline;
use crate::render::markup::{render_inline_box, render_items};
use crate::scanner;
use regex::Regex;
use std::io::Write;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

/// Inject identifiers and TOC markup into a rendered page.
///
/// Idempotent: headings keep existing ids, a page that already carries a
/// `toc-box` does not get a second one, and the sidebar list is replaced
/// rather than appended.
pub fn inject_page(html: &str, min_headings: usize, sidebar_class: &str) -> String {
    let page = scanner::scan_html(html.to_string());
    let Some(region) = page.region else {
        return html.to_string();
    };

    let outline = Outline::build(&page.headings, min_headings);
    if outline.is_empty() {
        return html.to_string();
    }

    // Ordered edits over the original source, applied back-to-front so
    // earlier offsets stay valid.
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for (heading, entry) in page.headings.iter().zip(&outline.entries) {
        if entry.synthesized {
            let insert_at = heading.open_tag_end - 1;
            edits.push((insert_at..insert_at, format!(r#" id="{}""#, entry.id)));
        }
    }

    let region_body = &html[region.body_start..region.body_end];
    if !region_body.contains(r#"class="toc-box""#) {
        edits.push((
            region.body_start..region.body_start,
            format!("\n{}", render_inline_box(&outline)),
        ));
    }

    if let Some(range) = sidebar_body(html, sidebar_class) {
        edits.push((range, render_items(&outline)));
    }

    apply_edits(html, edits)
}

/// Byte range of the sidebar container's current contents, if the page has
/// one. The matching close tag is found by tracking `<ul>` nesting depth so
/// a previously injected list is replaced whole.
fn sidebar_body(html: &str, sidebar_class: &str) -> Option<Range<usize>> {
    static SIDEBAR: OnceLock<Regex> = OnceLock::new();
    static UL: OnceLock<Regex> = OnceLock::new();
    let re = SIDEBAR.get_or_init(|| {
        Regex::new(r#"(?i)<ul\b[^>]*\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>"#).unwrap()
    });
    let ul = UL.get_or_init(|| Regex::new(r"(?i)<ul\b[^>]*>|</ul\s*>").unwrap());

    for caps in re.captures_iter(html) {
        let classes = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        if !classes.split_whitespace().any(|c| c == sidebar_class) {
            continue;
        }
        let body_start = caps.get(0).unwrap().end();

        let mut depth = 0usize;
        let mut body_end = html.len();
        for tag in ul.find_iter(&html[body_start..]) {
            if tag.as_str().starts_with("</") {
                if depth == 0 {
                    body_end = body_start + tag.start();
                    break;
                }
                depth -= 1;
            } else {
                depth += 1;
            }
        }
        return Some(body_start..body_end);
    }
    None
}

fn apply_edits(html: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| range.start);

    let mut out = html.to_string();
    for (range, replacement) in edits.into_iter().rev() {
        out.replace_range(range, &replacement);
    }
    out
}

/// Rewrite a page file in place, atomically.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the replacement cannot be
/// persisted.
pub fn inject_file(path: &Path, min_headings: usize, sidebar_class: &str) -> std::io::Result<()> {
    let html = std::fs::read_to_string(path)?;
    let rewritten = inject_page(&html, min_headings, sidebar_class);
    if rewritten == html {
        return Ok(());
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(rewritten.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
