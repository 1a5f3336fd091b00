//! Dynamic vertical layout with conditionally visible sections.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::collections::HashMap;

/// Section identifiers for layout areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Title,
    Search,
    Main,
    Status,
}

/// Maps section IDs to their computed areas.
pub struct DynamicLayout {
    areas: HashMap<Section, Rect>,
}

impl DynamicLayout {
    pub fn vertical(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder {
            area,
            sections: Vec::new(),
        }
    }

    pub fn get(&self, id: Section) -> Option<Rect> {
        self.areas.get(&id).copied()
    }

    /// Area for a section that is always visible.
    pub fn require(&self, id: Section) -> Rect {
        self.get(id)
            .unwrap_or_else(|| panic!("required layout section {id:?} not found"))
    }
}

pub struct DynamicLayoutBuilder {
    area: Rect,
    sections: Vec<(Section, Constraint, bool)>,
}

impl DynamicLayoutBuilder {
    /// Add an always-visible section.
    pub fn section(mut self, id: Section, constraint: Constraint) -> Self {
        self.sections.push((id, constraint, true));
        self
    }

    /// Add a conditionally visible section.
    pub fn section_if(mut self, visible: bool, id: Section, constraint: Constraint) -> Self {
        self.sections.push((id, constraint, visible));
        self
    }

    pub fn build(self) -> DynamicLayout {
        let constraints: Vec<Constraint> = self
            .sections
            .iter()
            .filter(|(_, _, visible)| *visible)
            .map(|(_, constraint, _)| *constraint)
            .collect();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(self.area);

        let mut areas = HashMap::new();
        let mut chunk_idx = 0;
        for (id, _, visible) in &self.sections {
            if *visible {
                areas.insert(*id, chunks[chunk_idx]);
                chunk_idx += 1;
            }
        }

        DynamicLayout { areas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_section_absent() {
        let layout = DynamicLayout::vertical(Rect::new(0, 0, 80, 24))
            .section(Section::Title, Constraint::Length(1))
            .section_if(false, Section::Search, Constraint::Length(3))
            .section(Section::Main, Constraint::Min(0))
            .section(Section::Status, Constraint::Length(1))
            .build();

        assert!(layout.get(Section::Search).is_none());
        assert!(layout.get(Section::Main).is_some());
    }

    #[test]
    fn test_visible_sections_tile_the_area() {
        let layout = DynamicLayout::vertical(Rect::new(0, 0, 80, 24))
            .section(Section::Title, Constraint::Length(1))
            .section_if(true, Section::Search, Constraint::Length(3))
            .section(Section::Main, Constraint::Min(0))
            .section(Section::Status, Constraint::Length(1))
            .build();

        let total: u16 = [Section::Title, Section::Search, Section::Main, Section::Status]
            .iter()
            .map(|&s| layout.require(s).height)
            .sum();
        assert_eq!(total, 24);
    }
}
