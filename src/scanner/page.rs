//! Page and heading types produced by the scanner.

use crate::scanner::utils::heading_text;

/// Byte range of the content region's body within the page source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Just past the `>` of the region's opening tag.
    pub body_start: usize,
    /// Start of the region's closing tag.
    pub body_end: usize,
}

/// One scanned heading element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading rank, 1–3.
    pub level: u8,
    /// Raw inner HTML of the element.
    pub inner_html: String,
    /// Pre-existing `id` attribute, if any.
    pub id: Option<String>,
    /// Byte offset of the `<` of the opening tag, absolute into the page.
    pub offset: usize,
    /// Byte offset just past the `>` of the opening tag.
    pub open_tag_end: usize,
}

impl Heading {
    /// Visible outline text: tags stripped, entities decoded, ordinal prefix
    /// removed.
    pub fn text(&self) -> String {
        heading_text(&self.inner_html)
    }
}

/// A scanned page: the raw source plus its content region and headings.
#[derive(Debug, Clone)]
pub struct Page {
    pub html: String,
    pub region: Option<Region>,
    pub headings: Vec<Heading>,
}

impl Page {
    pub fn new(html: String, region: Option<Region>, headings: Vec<Heading>) -> Self {
        Self {
            html,
            region,
            headings,
        }
    }

    /// Zero-based source line containing the given byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        let clamped = offset.min(self.html.len());
        self.html[..clamped].bytes().filter(|&b| b == b'\n').count()
    }

    /// Source line of each heading, in document order.
    pub fn heading_lines(&self) -> Vec<usize> {
        self.headings.iter().map(|h| self.line_of(h.offset)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, inner: &str, offset: usize) -> Heading {
        Heading {
            level,
            inner_html: inner.to_string(),
            id: None,
            offset,
            open_tag_end: offset + 4,
        }
    }

    #[test]
    fn test_heading_text_strips_prefix_and_tags() {
        let h = heading(2, "3. <em>Methods</em>", 0);
        assert_eq!(h.text(), "Methods");
    }

    #[test]
    fn test_line_of() {
        let page = Page::new("ab\ncd\nef".to_string(), None, vec![]);
        assert_eq!(page.line_of(0), 0);
        assert_eq!(page.line_of(3), 1);
        assert_eq!(page.line_of(7), 2);
        // Past the end clamps to the last line
        assert_eq!(page.line_of(999), 2);
    }

    #[test]
    fn test_heading_lines() {
        let html = "<article>\n<h1>A</h1>\n<p>x</p>\n<h2>B</h2>\n</article>".to_string();
        let h1 = heading(1, "A", html.find("<h1>").unwrap());
        let h2 = heading(2, "B", html.find("<h2>").unwrap());
        let page = Page::new(html, None, vec![h1, h2]);
        assert_eq!(page.heading_lines(), vec![1, 3]);
    }
}
