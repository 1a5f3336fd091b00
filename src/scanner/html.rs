//! Content-region location and heading element extraction.
//!
//! A rendered page keeps its post body inside an `<article>` element (older
//! layouts use `<main>`). Headings are scanned inside that region only, so
//! site chrome (navbar titles, footer headings) never leaks into the outline.

use crate::scanner::page::{Heading, Region};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn tag_pair_re(tag: &'static str, cell: &'static OnceLock<Regex>) -> &'static Regex {
    cell.get_or_init(|| Regex::new(&format!(r"(?i)<{tag}\b[^>]*>|</{tag}\s*>")).unwrap())
}

/// Locate the main content region of a page.
///
/// Tries `<article>` first, then `<main>`. The region spans the *first* such
/// element only; its close tag is found by tracking open/close nesting depth,
/// so sibling elements (post previews on an index page) stay outside the
/// region and nested markup cannot truncate it. Returns `None` when neither
/// element is present.
pub fn find_content_region(html: &str) -> Option<Region> {
    static ARTICLE: OnceLock<Regex> = OnceLock::new();
    static MAIN: OnceLock<Regex> = OnceLock::new();

    let candidates: [&Regex; 2] = [
        tag_pair_re("article", &ARTICLE),
        tag_pair_re("main", &MAIN),
    ];

    for re in candidates {
        let mut tags = re.find_iter(html);
        let Some(open) = tags.find(|m| !m.as_str().starts_with("</")) else {
            continue;
        };
        let body_start = open.end();

        let mut depth = 0usize;
        let mut body_end = html.len();
        for m in tags {
            if m.as_str().starts_with("</") {
                if depth == 0 {
                    body_end = m.start();
                    break;
                }
                depth -= 1;
            } else {
                depth += 1;
            }
        }
        return Some(Region {
            body_start,
            body_end,
        });
    }
    None
}

fn heading_re() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"(?is)<h([1-3])\b([^>]*)>(.*?)</h[1-3]\s*>").unwrap())
}

fn quoted_attr(attrs: &str, re: &Regex) -> Option<String> {
    re.captures(attrs).map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    })
}

fn id_attr(attrs: &str) -> Option<String> {
    static ID: OnceLock<Regex> = OnceLock::new();
    let re = ID.get_or_init(|| Regex::new(r#"(?i)\bid\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
    quoted_attr(attrs, re)
}

fn has_class(attrs: &str, class: &str) -> bool {
    static CLASS: OnceLock<Regex> = OnceLock::new();
    let re = CLASS.get_or_init(|| {
        Regex::new(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
    });
    quoted_attr(attrs, re)
        .map(|classes| classes.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Extract `<h1>`–`<h3>` elements within `range` of `html`, in document order.
///
/// Offsets in the returned headings are absolute into `html`. Headings
/// carrying the `subtitle` class are decorative and skipped.
pub fn scan_headings(html: &str, range: Range<usize>) -> Vec<Heading> {
    let slice = &html[range.clone()];
    let base = range.start;

    heading_re()
        .captures_iter(slice)
        .filter_map(|caps| {
            let whole = caps.get(0).unwrap();
            let level: u8 = caps[1].parse().ok()?;
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let inner = caps.get(3).unwrap();

            if has_class(attrs, "subtitle") {
                return None;
            }

            Some(Heading {
                level,
                inner_html: inner.as_str().to_string(),
                id: id_attr(attrs),
                offset: base + whole.start(),
                open_tag_end: base + inner.start(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<nav><h1 class="site-title">Blog</h1></nav>
<article class="post">
<h1 id="intro">1. Intro</h1>
<p>text</p>
<h2>Background</h2>
<h2 class="subtitle">tagline</h2>
<h3 id="detail">Detail</h3>
</article>
<footer><h2>Footer</h2></footer>
</body></html>"#;

    #[test]
    fn test_region_prefers_article() {
        let region = find_content_region(PAGE).unwrap();
        let body = &PAGE[region.body_start..region.body_end];
        assert!(body.contains("Background"));
        assert!(!body.contains("site-title"));
        assert!(!body.contains("Footer"));
    }

    #[test]
    fn test_region_falls_back_to_main() {
        let html = "<body><main><h1>A</h1></main></body>";
        let region = find_content_region(html).unwrap();
        assert_eq!(&html[region.body_start..region.body_end], "<h1>A</h1>");
    }

    #[test]
    fn test_region_absent() {
        assert!(find_content_region("<div><h1>A</h1></div>").is_none());
    }

    #[test]
    fn test_region_spans_nested_element() {
        let html = "<article><article>inner</article><h2>B</h2></article>";
        let region = find_content_region(html).unwrap();
        let body = &html[region.body_start..region.body_end];
        assert!(body.ends_with("<h2>B</h2>"));
    }

    #[test]
    fn test_region_stops_at_first_sibling_close() {
        // Index pages carry one <article> per post preview; only the first
        // one is the content region
        let html = "<body>\
<article><h1>First</h1><h2>A</h2></article>\
<article><h1>Second</h1><h2>B</h2></article>\
</body>";
        let region = find_content_region(html).unwrap();
        let body = &html[region.body_start..region.body_end];
        assert!(body.contains("First"));
        assert!(!body.contains("Second"));

        let headings = scan_headings(html, region.body_start..region.body_end);
        assert_eq!(headings.len(), 2);
    }

    #[test]
    fn test_scan_headings_in_region() {
        let region = find_content_region(PAGE).unwrap();
        let headings = scan_headings(PAGE, region.body_start..region.body_end);

        let levels: Vec<u8> = headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert_eq!(headings[0].id.as_deref(), Some("intro"));
        assert_eq!(headings[1].id, None);
        assert_eq!(headings[0].inner_html, "1. Intro");
    }

    #[test]
    fn test_scan_skips_subtitle_class() {
        let region = find_content_region(PAGE).unwrap();
        let headings = scan_headings(PAGE, region.body_start..region.body_end);
        assert!(headings.iter().all(|h| h.inner_html != "tagline"));
    }

    #[test]
    fn test_scan_offsets_are_absolute() {
        let region = find_content_region(PAGE).unwrap();
        let headings = scan_headings(PAGE, region.body_start..region.body_end);
        for h in &headings {
            assert!(PAGE[h.offset..].starts_with("<h"));
            assert_eq!(PAGE.as_bytes()[h.open_tag_end - 1], b'>');
        }
    }

    #[test]
    fn test_scan_single_quoted_attrs() {
        let html = "<article><h2 id='x' class='fancy'>T</h2></article>";
        let region = find_content_region(html).unwrap();
        let headings = scan_headings(html, region.body_start..region.body_end);
        assert_eq!(headings[0].id.as_deref(), Some("x"));
    }

    #[test]
    fn test_scan_ignores_h4_and_beyond() {
        let html = "<article><h2>A</h2><h4>deep</h4><h3>B</h3></article>";
        let region = find_content_region(html).unwrap();
        let headings = scan_headings(html, region.body_start..region.body_end);
        assert_eq!(headings.len(), 2);
    }

    #[test]
    fn test_scan_multiline_heading() {
        let html = "<article><h2>\n  Split\n  Title\n</h2></article>";
        let region = find_content_region(html).unwrap();
        let headings = scan_headings(html, region.body_start..region.body_end);
        assert_eq!(headings.len(), 1);
        assert!(headings[0].inner_html.contains("Split"));
    }
}
