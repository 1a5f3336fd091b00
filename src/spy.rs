//! Scroll-spy: which outline entry is active for a scroll position.
//!
//! The active entry is computed, not observed: for a scroll offset the spy
//! picks the closest heading at or above the threshold line (scroll top plus
//! the fixed navigation offset and top margin). This replaces callback-order
//! dependent visibility observation with a deterministic rule, and makes "at
//! most one active entry" true by construction.
//!
//! Units are abstract: pixels when driving a page, rows when driving the
//! terminal preview. The spy only does arithmetic on positions supplied by
//! the caller.

use crate::outline::Outline;

/// Geometry constants for the spy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpyConfig {
    /// Height reserved for a fixed navigation bar. Falls back to the site
    /// default when no value is configured.
    pub nav_offset: u32,
    /// Extra margin below the navigation bar before a heading counts as
    /// reached.
    pub top_margin: u32,
    /// Dead zone at the bottom of the outline panel; a link inside it is
    /// considered out of view.
    pub panel_reserve: u32,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            nav_offset: 58,
            top_margin: 20,
            panel_reserve: 40,
        }
    }
}

/// One spy target: an outline entry id at a document position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpyTarget {
    pub id: String,
    pub position: u32,
}

/// Active-entry computation over a fixed set of targets.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    targets: Vec<SpyTarget>,
    config: SpyConfig,
}

impl ScrollSpy {
    /// Build a spy from targets. Targets are kept sorted by position so the
    /// result is independent of input order.
    pub fn new(mut targets: Vec<SpyTarget>, config: SpyConfig) -> Self {
        targets.sort_by_key(|t| t.position);
        Self { targets, config }
    }

    /// Build a spy from an outline and the matching document positions
    /// (parallel to the outline entries).
    pub fn from_outline(outline: &Outline, positions: &[u32], config: SpyConfig) -> Self {
        let targets = outline
            .entries
            .iter()
            .zip(positions)
            .map(|(entry, &position)| SpyTarget {
                id: entry.id.clone(),
                position,
            })
            .collect();
        Self::new(targets, config)
    }

    /// The entry id active at `scroll_top`, if any.
    ///
    /// Threshold = `scroll_top + nav_offset + top_margin`; the active target
    /// is the last one positioned at or above it. `None` until the first
    /// target crosses the threshold, and always `None` for an empty outline.
    pub fn active(&self, scroll_top: u32) -> Option<&str> {
        let threshold = scroll_top.saturating_add(self.config.nav_offset + self.config.top_margin);
        self.targets
            .iter()
            .take_while(|t| t.position <= threshold)
            .last()
            .map(|t| t.id.as_str())
    }

    /// Panel adjustment keeping the active link visible.
    ///
    /// `link_pos` is the link's offset within the panel content,
    /// `panel_scroll` the panel's current scroll offset, `panel_height` its
    /// viewport height. Returns a new scroll offset centering the link when
    /// it sits above the viewport or inside the bottom reserve, `None` when
    /// it is already comfortably visible.
    pub fn panel_scroll(&self, link_pos: u32, panel_scroll: u32, panel_height: u32) -> Option<u32> {
        let relative = link_pos as i64 - panel_scroll as i64;
        let visible_limit = panel_height.saturating_sub(self.config.panel_reserve) as i64;

        if relative >= 0 && relative <= visible_limit {
            return None;
        }

        let centered = panel_scroll as i64 + relative - (panel_height / 2) as i64;
        Some(centered.max(0) as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spy(positions: &[(&str, u32)], config: SpyConfig) -> ScrollSpy {
        ScrollSpy::new(
            positions
                .iter()
                .map(|(id, position)| SpyTarget {
                    id: id.to_string(),
                    position: *position,
                })
                .collect(),
            config,
        )
    }

    fn flat() -> SpyConfig {
        SpyConfig {
            nav_offset: 0,
            top_margin: 0,
            panel_reserve: 2,
        }
    }

    #[test]
    fn test_exactly_one_active_for_reached_heading() {
        let spy = spy(&[("a", 0), ("b", 100), ("c", 200)], flat());
        assert_eq!(spy.active(100), Some("b"));
        assert_eq!(spy.active(150), Some("b"));
        assert_eq!(spy.active(200), Some("c"));
    }

    #[test]
    fn test_none_before_first_heading() {
        let spy = spy(&[("a", 50), ("b", 100)], flat());
        assert_eq!(spy.active(0), None);
        assert_eq!(spy.active(49), None);
        assert_eq!(spy.active(50), Some("a"));
    }

    #[test]
    fn test_nav_offset_and_margin_shift_threshold() {
        let config = SpyConfig {
            nav_offset: 58,
            top_margin: 20,
            panel_reserve: 40,
        };
        let spy = spy(&[("a", 100)], config);
        // 100 <= 22 + 78
        assert_eq!(spy.active(22), Some("a"));
        assert_eq!(spy.active(21), None);
    }

    #[test]
    fn test_last_heading_stays_active_past_end() {
        let spy = spy(&[("a", 0), ("b", 100)], flat());
        assert_eq!(spy.active(10_000), Some("b"));
    }

    #[test]
    fn test_coincident_positions_pick_last_in_document_order() {
        // Explicit tie-break: identical positions resolve to the later entry
        let spy = spy(&[("a", 100), ("b", 100)], flat());
        assert_eq!(spy.active(100), Some("b"));
    }

    #[test]
    fn test_unordered_targets_are_sorted() {
        let spy = spy(&[("c", 200), ("a", 0), ("b", 100)], flat());
        assert_eq!(spy.active(120), Some("b"));
    }

    #[test]
    fn test_empty_outline_is_noop() {
        let spy = spy(&[], flat());
        assert!(spy.is_empty());
        assert_eq!(spy.active(0), None);
    }

    #[test]
    fn test_from_outline_pairs_positions() {
        use crate::outline::{Outline, OutlineEntry};
        let outline = Outline {
            entries: vec![
                OutlineEntry {
                    id: "x".into(),
                    text: "X".into(),
                    level: 1,
                    synthesized: true,
                },
                OutlineEntry {
                    id: "y".into(),
                    text: "Y".into(),
                    level: 2,
                    synthesized: true,
                },
            ],
        };
        let spy = ScrollSpy::from_outline(&outline, &[10, 20], flat());
        assert_eq!(spy.active(15), Some("x"));
        assert_eq!(spy.active(20), Some("y"));
    }

    #[test]
    fn test_panel_scroll_visible_link_untouched() {
        let spy = spy(&[("a", 0)], flat());
        // link at row 5 of a 20-row panel scrolled to 0
        assert_eq!(spy.panel_scroll(5, 0, 20), None);
    }

    #[test]
    fn test_panel_scroll_centers_link_below_view() {
        let spy = spy(&[("a", 0)], flat());
        // panel of 20 rows at scroll 0, link at row 30: center it
        assert_eq!(spy.panel_scroll(30, 0, 20), Some(20));
    }

    #[test]
    fn test_panel_scroll_centers_link_above_view() {
        let spy = spy(&[("a", 0)], flat());
        // panel scrolled to 50, link at row 30 (above view)
        assert_eq!(spy.panel_scroll(30, 50, 20), Some(20));
    }

    #[test]
    fn test_panel_scroll_reserve_zone_counts_as_hidden() {
        let spy = spy(&[("a", 0)], flat());
        // reserve of 2: row 19 of a 20-row panel is inside the dead zone
        assert_eq!(spy.panel_scroll(19, 0, 20), Some(9));
        assert_eq!(spy.panel_scroll(18, 0, 20), None);
    }

    #[test]
    fn test_panel_scroll_clamps_at_zero() {
        let config = SpyConfig {
            nav_offset: 0,
            top_margin: 0,
            panel_reserve: 10,
        };
        let spy = spy(&[("a", 0)], config);
        assert_eq!(spy.panel_scroll(12, 0, 20), Some(2));
        // Centering would go negative; clamp to the top
        assert_eq!(spy.panel_scroll(2, 10, 20), Some(0));
    }
}
