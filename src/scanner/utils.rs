//! Text cleanup helpers for scanned headings.
//!
//! Heading text arrives as the inner HTML of an `<h1>`–`<h3>` element and has
//! to be reduced to the visible text before it can appear in an outline.

use regex::Regex;
use std::sync::OnceLock;

/// Strip inline HTML tags from a fragment, keeping their text content.
///
/// Handles arbitrary tags (`<strong>`, `<em>`, `<code>`, `<a href="…">`, …)
/// including self-closing ones. Comments are removed as well.
///
/// # Examples
///
/// ```
/// # use tocsmith::scanner::utils::strip_inline_tags;
/// assert_eq!(strip_inline_tags("<strong>Setup</strong> guide"), "Setup guide");
/// assert_eq!(strip_inline_tags("plain"), "plain");
/// ```
pub fn strip_inline_tags(html: &str) -> String {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let comment = COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
    let tag = TAG.get_or_init(|| Regex::new(r"(?s)</?[a-zA-Z][^>]*>").unwrap());

    let without_comments = comment.replace_all(html, "");
    tag.replace_all(&without_comments, "").to_string()
}

/// Decode the named and numeric entities that show up in rendered headings.
///
/// Jekyll's renderers emit a small, predictable set; this is not a general
/// HTML entity table.
pub fn decode_entities(text: &str) -> String {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    let numeric = NUMERIC.get_or_init(|| Regex::new(r"&#(x?[0-9a-fA-F]+);").unwrap());

    let mut result = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    result = numeric
        .replace_all(&result, |caps: &regex::Captures| {
            let body = &caps[1];
            let parsed = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
                u32::from_str_radix(hex, 16)
            } else {
                body.parse::<u32>()
            };
            parsed
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .to_string();

    // &amp; last so "&amp;lt;" does not turn into "<".
    result.replace("&amp;", "&")
}

/// Strip a leading ordinal prefix ("3.", "12. ", "4 ") from heading text.
///
/// Section headings on numbered posts carry their ordinal in the visible
/// text; the outline stores the bare title.
///
/// # Examples
///
/// ```
/// # use tocsmith::scanner::utils::strip_ordinal_prefix;
/// assert_eq!(strip_ordinal_prefix("1. Intro"), "Intro");
/// assert_eq!(strip_ordinal_prefix("Background"), "Background");
/// ```
pub fn strip_ordinal_prefix(text: &str) -> &str {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    let ordinal = ORDINAL.get_or_init(|| Regex::new(r"^\d+\.?\s*").unwrap());

    match ordinal.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Reduce heading inner HTML to its outline text: tags stripped, entities
/// decoded, ordinal prefix removed, whitespace trimmed.
pub fn heading_text(inner_html: &str) -> String {
    let stripped = strip_inline_tags(inner_html);
    let decoded = decode_entities(&stripped);
    strip_ordinal_prefix(decoded.trim()).trim().to_string()
}

/// Escape text for interpolation into emitted markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_inline_tags() {
        assert_eq!(strip_inline_tags("<strong>bold</strong>"), "bold");
        assert_eq!(strip_inline_tags("<code>fn main()</code> here"), "fn main() here");
        assert_eq!(
            strip_inline_tags(r##"<a href="#x">linked</a> title"##),
            "linked title"
        );
        assert_eq!(strip_inline_tags("a <br/> b"), "a  b");
        assert_eq!(strip_inline_tags("<!-- note -->visible"), "visible");
        assert_eq!(strip_inline_tags("no tags"), "no tags");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("A &amp; B"), "A & B");
        assert_eq!(decode_entities("&lt;T&gt;"), "<T>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("&#39;s"), "'s");
        assert_eq!(decode_entities("&#x2192; next"), "\u{2192} next");
        assert_eq!(decode_entities("&#8212;"), "\u{2014}");
        // Double-escaped ampersand decodes one level only
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_strip_ordinal_prefix() {
        assert_eq!(strip_ordinal_prefix("1. Intro"), "Intro");
        assert_eq!(strip_ordinal_prefix("12. Deep Dive"), "Deep Dive");
        assert_eq!(strip_ordinal_prefix("3 Results"), "Results");
        assert_eq!(strip_ordinal_prefix("Background"), "Background");
        // Ordinal only when leading
        assert_eq!(strip_ordinal_prefix("Top 10 Lists"), "Top 10 Lists");
    }

    #[test]
    fn test_heading_text_pipeline() {
        assert_eq!(heading_text("3. <em>Methods &amp; Tools</em>"), "Methods & Tools");
        assert_eq!(heading_text("  Background  "), "Background");
        assert_eq!(heading_text("1. Intro"), "Intro");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
        assert_eq!(escape_html("plain"), "plain");
    }
}
