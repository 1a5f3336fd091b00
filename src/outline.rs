//! Outline computation: identifier synthesis and nesting.
//!
//! This is a pure step: scanned headings in, an [`Outline`] out. Nothing here
//! touches the page source; applying identifiers back onto the markup is the
//! renderer's job.

use crate::scanner::Heading;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One outline entry: a heading's identifier, visible text, and rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
    /// True when the id was synthesized here rather than found on the element.
    #[serde(skip)]
    pub synthesized: bool,
}

/// A node in the nested outline view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub entry: OutlineEntry,
    pub children: Vec<OutlineNode>,
}

/// An ordered document outline.
///
/// Entries preserve document order and correspond 1:1 to the scanned
/// headings they were built from. The outline is immutable after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

impl Outline {
    /// Build an outline from scanned headings.
    ///
    /// Identifiers follow hierarchical counters: `section-<h1>`,
    /// `section-[<h1>-]<h2>`, `section-[<h1>-]<h2>-<h3>`. A level-1 heading
    /// resets the level-2/3 counters, a level-2 resets level-3. Headings that
    /// already carry an id keep it untouched; a synthesized id that would
    /// collide with one gets a `-2`, `-3`, … suffix.
    ///
    /// Fewer than `min_headings` headings produce an empty outline.
    pub fn build(headings: &[Heading], min_headings: usize) -> Self {
        if headings.len() < min_headings {
            return Self::default();
        }

        let mut used: HashSet<String> = headings.iter().filter_map(|h| h.id.clone()).collect();

        let (mut h1n, mut h2n, mut h3n) = (0u32, 0u32, 0u32);
        let mut entries = Vec::with_capacity(headings.len());

        for heading in headings {
            let candidate = match heading.level {
                1 => {
                    h1n += 1;
                    h2n = 0;
                    h3n = 0;
                    format!("section-{h1n}")
                }
                2 => {
                    h2n += 1;
                    h3n = 0;
                    if h1n > 0 {
                        format!("section-{h1n}-{h2n}")
                    } else {
                        format!("section-{h2n}")
                    }
                }
                _ => {
                    h3n += 1;
                    if h1n > 0 {
                        format!("section-{h1n}-{h2n}-{h3n}")
                    } else {
                        format!("section-{h2n}-{h3n}")
                    }
                }
            };

            let (id, synthesized) = match &heading.id {
                Some(existing) => (existing.clone(), false),
                None => {
                    let unique = uniquify(candidate, &used);
                    used.insert(unique.clone());
                    (unique, true)
                }
            };

            entries.push(OutlineEntry {
                id,
                text: heading.text(),
                level: heading.level,
                synthesized,
            });
        }

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Nested view: level-2/3 entries attach to the nearest preceding
    /// lower-level entry; entries with no such parent become roots.
    pub fn tree(&self) -> Vec<OutlineNode> {
        let mut roots: Vec<OutlineNode> = Vec::new();

        for entry in &self.entries {
            let node = OutlineNode {
                entry: entry.clone(),
                children: Vec::new(),
            };
            attach(&mut roots, node);
        }

        roots
    }

    /// Entries whose text contains `pattern`, case-insensitively.
    pub fn filter(&self, pattern: &str) -> Vec<&OutlineEntry> {
        let needle = pattern.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.text.to_lowercase().contains(&needle))
            .collect()
    }

    /// Entries at the given level.
    pub fn at_level(&self, level: u8) -> Vec<&OutlineEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Entry count per level (index 0 = level 1).
    pub fn counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for entry in &self.entries {
            if (1..=3).contains(&entry.level) {
                counts[entry.level as usize - 1] += 1;
            }
        }
        counts
    }
}

fn uniquify(candidate: String, used: &HashSet<String>) -> String {
    if !used.contains(&candidate) {
        return candidate;
    }
    let mut n = 2;
    loop {
        let suffixed = format!("{candidate}-{n}");
        if !used.contains(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}

fn attach(siblings: &mut Vec<OutlineNode>, node: OutlineNode) {
    if let Some(last) = siblings.last_mut() {
        if node.entry.level > last.entry.level {
            attach(&mut last.children, node);
            return;
        }
    }
    siblings.push(node);
}

impl OutlineNode {
    /// Render this node and its children as a box-drawing tree.
    pub fn render_box_tree(&self, prefix: &str, is_last: bool) -> String {
        let connector = if is_last { "└── " } else { "├── " };
        let mut out = format!("{prefix}{connector}{}\n", self.entry.text);

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        for (i, child) in self.children.iter().enumerate() {
            let last = i == self.children.len() - 1;
            out.push_str(&child.render_box_tree(&child_prefix, last));
        }
        out
    }
}
