//! Substring search over the pre-built site corpus.
//!
//! The site build emits a JSON array of page summaries
//! (`assets/data/searchcorpus.json`); the corpus is loaded once and queried
//! with a case-insensitive substring match across its text fields.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Queries shorter than this return nothing.
pub const MIN_QUERY_LEN: usize = 2;
/// Result cap per query.
pub const MAX_RESULTS: usize = 10;

/// One searchable page summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
}

impl CorpusEntry {
    /// Excerpt shortened for display, on a char boundary.
    pub fn short_excerpt(&self, max_chars: usize) -> String {
        if self.excerpt.chars().count() <= max_chars {
            return self.excerpt.clone();
        }
        let mut out: String = self.excerpt.chars().take(max_chars).collect();
        out.push('\u{2026}');
        out
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// The loaded corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// Parse a corpus from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    /// Load a corpus file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// page summaries.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(io::Error::other)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search across title, excerpt, content and
    /// category. Results keep corpus order and are capped at
    /// [`MAX_RESULTS`]; queries below [`MIN_QUERY_LEN`] characters yield
    /// nothing.
    pub fn search(&self, query: &str) -> Vec<&CorpusEntry> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .take(MAX_RESULTS)
            .collect()
    }
}

/// Resolve a corpus URL for opening in a browser.
///
/// Corpus entries carry site-relative paths (`/posts/x`); joining them onto
/// the site base yields something a browser can open. Absolute URLs pass
/// through, as does everything when no base is configured.
pub fn resolve_url(base: Option<&str>, url: &str) -> String {
    match base {
        Some(base) if !url.contains("://") => {
            format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, category: &str, content: &str) -> CorpusEntry {
        CorpusEntry {
            title: title.to_string(),
            url: format!("/posts/{}", title.to_lowercase().replace(' ', "-")),
            excerpt: format!("{title} excerpt"),
            content: content.to_string(),
            category: category.to_string(),
        }
    }

    fn corpus() -> Corpus {
        Corpus::new(vec![
            entry("Rust Basics", "programming", "ownership and borrowing"),
            entry("Garden Notes", "hobby", "tomatoes and rust fungus"),
            entry("CV", "about", "career history"),
        ])
    }

    #[test]
    fn test_search_matches_title_and_content() {
        let c = corpus();
        let hits = c.search("rust");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Rust Basics");
        assert_eq!(hits[1].title, "Garden Notes");
    }

    #[test]
    fn test_search_matches_category() {
        let c = corpus();
        let hits = c.search("hobby");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Garden Notes");
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let c = corpus();
        assert_eq!(c.search("  RUST ").len(), 2);
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let c = corpus();
        assert!(c.search("r").is_empty());
        assert!(c.search("").is_empty());
        assert!(c.search("  ").is_empty());
    }

    #[test]
    fn test_results_capped() {
        let entries = (0..25)
            .map(|i| entry(&format!("Post {i}"), "misc", "common word"))
            .collect();
        let c = Corpus::new(entries);
        assert_eq!(c.search("common").len(), MAX_RESULTS);
    }

    #[test]
    fn test_no_match() {
        assert!(corpus().search("quantum").is_empty());
    }

    #[test]
    fn test_from_json_with_missing_optional_fields() {
        let json = r#"[{"title":"T","url":"/t"}]"#;
        let c = Corpus::from_json(json).unwrap();
        assert_eq!(c.len(), 1);
        assert!(c.search("t ").is_empty()); // trimmed to below min length
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Corpus::from_json(r#"{"title":"T"}"#).is_err());
    }

    #[test]
    fn test_resolve_url_joins_relative_onto_base() {
        assert_eq!(
            resolve_url(Some("https://example.org"), "/posts/x"),
            "https://example.org/posts/x"
        );
        assert_eq!(
            resolve_url(Some("https://example.org/"), "posts/x"),
            "https://example.org/posts/x"
        );
    }

    #[test]
    fn test_resolve_url_passes_absolute_through() {
        assert_eq!(
            resolve_url(Some("https://example.org"), "https://other.net/a"),
            "https://other.net/a"
        );
        assert_eq!(resolve_url(None, "/posts/x"), "/posts/x");
    }

    #[test]
    fn test_short_excerpt_truncates_on_char_boundary() {
        let mut e = entry("T", "c", "x");
        e.excerpt = "héllo wörld again".to_string();
        let short = e.short_excerpt(5);
        assert_eq!(short, "héllo\u{2026}");
        // Short excerpts pass through untouched
        assert_eq!(e.short_excerpt(100), e.excerpt);
    }
}
