use crate::config::Config;
use crate::outline::Outline;
use crate::scanner::{self, Page};
use crate::spy::{ScrollSpy, SpyConfig};
use crate::tui::terminal_compat::ColorMode;
use crate::tui::theme::{Theme, ThemeName};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};
use ratatui::widgets::ListState;
use std::path::PathBuf;

/// Spy geometry for the preview: positions are content rows, the active
/// entry flips when its heading reaches two rows below the pane top, and
/// the outline panel keeps a two-row dead zone at its bottom.
const TUI_SPY: SpyConfig = SpyConfig {
    nav_offset: 0,
    top_margin: 2,
    panel_reserve: 2,
};

const OUTLINE_WIDTHS: [u16; 3] = [20, 30, 40];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Outline,
    Content,
}

/// One row of the outline pane.
#[derive(Debug, Clone)]
pub struct OutlineItem {
    pub level: u8,
    pub text: String,
    pub id: String,
    /// Source line of the heading in the content pane.
    pub line: usize,
}

pub struct App {
    pub page: Page,
    pub outline: Outline,
    pub filename: String,
    pub current_file_path: PathBuf,

    pub outline_items: Vec<OutlineItem>,
    /// Indices into `outline_items` surviving the filter, document order.
    pub visible: Vec<usize>,
    pub outline_state: ListState,
    pub outline_pane_height: u16,

    pub content_scroll: u16,
    pub content_height: u16,
    pub content_pane_height: u16,

    pub focus: Focus,
    pub show_outline: bool,
    pub outline_width: u16,
    pub show_help: bool,
    pub show_filter: bool,
    pub filter_query: String,
    pub status_message: Option<String>,

    spy: ScrollSpy,
    pub active_id: Option<String>,

    matcher: Matcher,
    clipboard: Option<arboard::Clipboard>,
    config: Config,
    pub current_theme: ThemeName,
    pub theme: Theme,
    color_mode: ColorMode,
}

impl App {
    pub fn new(
        page: Page,
        outline: Outline,
        filename: String,
        file_path: PathBuf,
        config: Config,
        color_mode: ColorMode,
    ) -> Self {
        let outline_items = build_items(&page, &outline);
        let visible: Vec<usize> = (0..outline_items.len()).collect();
        let spy = build_spy(&outline_items);

        let mut outline_state = ListState::default();
        if !outline_items.is_empty() {
            outline_state.select(Some(0));
        }

        let content_height = u16::try_from(page.html.lines().count()).unwrap_or(u16::MAX);
        let current_theme = config.theme_name();
        let theme = Theme::from_name(current_theme).with_color_mode(color_mode);
        let outline_width = config.ui.outline_width;

        Self {
            page,
            outline,
            filename,
            current_file_path: file_path,
            outline_items,
            visible,
            outline_state,
            outline_pane_height: 0,
            content_scroll: 0,
            content_height,
            content_pane_height: 0,
            focus: Focus::Content,
            show_outline: true,
            outline_width,
            show_help: false,
            show_filter: false,
            filter_query: String::new(),
            status_message: None,
            spy,
            active_id: None,
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
            clipboard: arboard::Clipboard::new().ok(),
            config,
            current_theme,
            theme,
            color_mode,
        }
    }

    // scroll-spy

    /// Recompute the active entry from the content scroll position and keep
    /// it visible in the outline pane.
    pub fn update_active(&mut self) {
        let active = self
            .spy
            .active(self.content_scroll as u32)
            .map(str::to_string);
        if active == self.active_id {
            return;
        }
        self.active_id = active;

        let Some(ref id) = self.active_id else {
            return;
        };
        let Some(row) = self
            .visible
            .iter()
            .position(|&i| &self.outline_items[i].id == id)
        else {
            return;
        };

        let panel_scroll = self.outline_state.offset() as u32;
        if let Some(new_offset) =
            self.spy
                .panel_scroll(row as u32, panel_scroll, self.outline_pane_height as u32)
        {
            *self.outline_state.offset_mut() = new_offset as usize;
        }
    }

    // content navigation

    fn max_scroll(&self) -> u16 {
        self.content_height
            .saturating_sub(self.content_pane_height.max(1))
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.content_scroll = (self.content_scroll + rows).min(self.max_scroll());
        self.update_active();
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.content_scroll = self.content_scroll.saturating_sub(rows);
        self.update_active();
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll_down(self.content_pane_height.max(1) / 2);
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll_up(self.content_pane_height.max(1) / 2);
    }

    pub fn scroll_top(&mut self) {
        self.content_scroll = 0;
        self.update_active();
    }

    pub fn scroll_bottom(&mut self) {
        self.content_scroll = self.max_scroll();
        self.update_active();
    }

    // outline navigation

    pub fn next_entry(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let next = match self.outline_state.selected() {
            Some(i) if i + 1 < self.visible.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.outline_state.select(Some(next));
    }

    pub fn previous_entry(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let prev = self.outline_state.selected().unwrap_or(0).saturating_sub(1);
        self.outline_state.select(Some(prev));
    }

    /// Jump the content pane to the selected entry's heading.
    pub fn jump_to_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        self.content_scroll = (item.line as u16).min(self.max_scroll());
        self.update_active();
    }

    pub fn selected_item(&self) -> Option<&OutlineItem> {
        let row = self.outline_state.selected()?;
        let idx = *self.visible.get(row)?;
        self.outline_items.get(idx)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Outline => Focus::Content,
            Focus::Content => Focus::Outline,
        };
    }

    // filtering

    pub fn toggle_filter(&mut self) {
        self.show_filter = !self.show_filter;
        if !self.show_filter {
            self.filter_query.clear();
            self.apply_filter();
        }
    }

    pub fn filter_input(&mut self, c: char) {
        self.filter_query.push(c);
        self.apply_filter();
    }

    pub fn filter_backspace(&mut self) {
        self.filter_query.pop();
        self.apply_filter();
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.apply_filter();
        self.show_filter = false;
    }

    /// Fuzzy-match the filter query against entry text, keeping document
    /// order for the survivors.
    pub fn apply_filter(&mut self) {
        if self.filter_query.is_empty() {
            self.visible = (0..self.outline_items.len()).collect();
        } else {
            let pattern = Pattern::parse(
                &self.filter_query,
                CaseMatching::Ignore,
                Normalization::Smart,
            );
            let mut buf = Vec::new();
            self.visible = self
                .outline_items
                .iter()
                .enumerate()
                .filter(|(_, item)| {
                    pattern
                        .score(Utf32Str::new(&item.text, &mut buf), &mut self.matcher)
                        .is_some()
                })
                .map(|(i, _)| i)
                .collect();
        }

        let selected = match self.visible.is_empty() {
            true => None,
            false => Some(0),
        };
        self.outline_state.select(selected);
        *self.outline_state.offset_mut() = 0;
    }

    // actions

    /// Copy the active (or selected) entry's anchor to the clipboard.
    pub fn copy_anchor(&mut self) {
        let id = self
            .active_id
            .clone()
            .or_else(|| self.selected_item().map(|item| item.id.clone()));
        let Some(id) = id else {
            self.status_message = Some("No entry to copy".to_string());
            return;
        };

        let anchor = format!("#{id}");
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(anchor.clone()) {
                Ok(()) => self.status_message = Some(format!("Copied {anchor}")),
                Err(e) => self.status_message = Some(format!("Clipboard error: {e}")),
            },
            None => self.status_message = Some("Clipboard unavailable".to_string()),
        }
    }

    /// Open the previewed page in the default browser.
    pub fn open_in_browser(&mut self) {
        match open::that(&self.current_file_path) {
            Ok(()) => self.status_message = Some(format!("Opened {}", self.filename)),
            Err(e) => self.status_message = Some(format!("Open failed: {e}")),
        }
    }

    pub fn toggle_outline(&mut self) {
        self.show_outline = !self.show_outline;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn cycle_outline_width(&mut self, forward: bool) {
        let pos = OUTLINE_WIDTHS
            .iter()
            .position(|&w| w == self.outline_width)
            .unwrap_or(1);
        let next = if forward {
            (pos + 1) % OUTLINE_WIDTHS.len()
        } else {
            (pos + OUTLINE_WIDTHS.len() - 1) % OUTLINE_WIDTHS.len()
        };
        self.outline_width = OUTLINE_WIDTHS[next];
        self.status_message = Some(format!("Outline width {}%", self.outline_width));
    }

    pub fn save_outline_width(&mut self) {
        match self.config.set_outline_width(self.outline_width) {
            Ok(()) => {
                self.status_message = Some(format!("Saved width {}%", self.outline_width));
            }
            Err(e) => self.status_message = Some(format!("Save failed: {e}")),
        }
    }

    pub fn cycle_theme(&mut self) {
        self.current_theme = self.current_theme.next();
        self.theme = Theme::from_name(self.current_theme).with_color_mode(self.color_mode);
        if self.config.set_theme(self.current_theme).is_ok() {
            self.status_message = Some(format!("Theme: {}", self.current_theme.label()));
        }
    }

    /// Rescan the page after an external change, preserving scroll position.
    pub fn reload_current_file(&mut self) -> std::io::Result<()> {
        let page = scanner::scan_file(&self.current_file_path)?;
        let outline = Outline::build(&page.headings, self.config.toc.min_headings);

        self.outline_items = build_items(&page, &outline);
        self.spy = build_spy(&self.outline_items);
        self.content_height = u16::try_from(page.html.lines().count()).unwrap_or(u16::MAX);
        self.page = page;
        self.outline = outline;

        self.apply_filter();
        self.content_scroll = self.content_scroll.min(self.max_scroll());
        self.active_id = None;
        self.update_active();
        Ok(())
    }
}

fn build_items(page: &Page, outline: &Outline) -> Vec<OutlineItem> {
    let lines = page.heading_lines();
    outline
        .entries
        .iter()
        .zip(lines)
        .map(|(entry, line)| OutlineItem {
            level: entry.level,
            text: entry.text.clone(),
            id: entry.id.clone(),
            line,
        })
        .collect()
}

fn build_spy(items: &[OutlineItem]) -> ScrollSpy {
    ScrollSpy::new(
        items
            .iter()
            .map(|item| crate::spy::SpyTarget {
                id: item.id.clone(),
                position: item.line as u32,
            })
            .collect(),
        TUI_SPY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let html = "<article>\n<h1>1. Intro</h1>\n<p>a</p>\n<p>b</p>\n<p>c</p>\n\
                    <h2>Background</h2>\n<p>d</p>\n<p>e</p>\n<h3>Detail</h3>\n\
                    <p>f</p>\n</article>";
        let page = scanner::scan_html(html.to_string());
        let outline = Outline::build(&page.headings, 2);
        let mut app = App::new(
            page,
            outline,
            "post.html".to_string(),
            PathBuf::from("post.html"),
            Config::default(),
            ColorMode::Rgb,
        );
        app.content_pane_height = 4;
        app.outline_pane_height = 10;
        app
    }

    #[test]
    fn test_items_carry_heading_lines() {
        let app = app();
        assert_eq!(app.outline_items.len(), 3);
        assert_eq!(app.outline_items[0].line, 1);
        assert_eq!(app.outline_items[1].line, 5);
        assert_eq!(app.outline_items[2].line, 8);
    }

    #[test]
    fn test_scroll_drives_active_entry() {
        let mut app = app();
        app.update_active();
        assert_eq!(app.active_id.as_deref(), Some("section-1"));

        app.scroll_down(4);
        assert_eq!(app.active_id.as_deref(), Some("section-1-1"));

        app.scroll_down(2);
        assert_eq!(app.active_id.as_deref(), Some("section-1-1-1"));

        app.scroll_top();
        assert_eq!(app.active_id.as_deref(), Some("section-1"));
    }

    #[test]
    fn test_jump_to_selected_scrolls_content() {
        let mut app = app();
        app.next_entry();
        app.jump_to_selected();
        assert_eq!(app.content_scroll, 5);
        assert_eq!(app.active_id.as_deref(), Some("section-1-1"));
    }

    #[test]
    fn test_filter_narrows_visible_entries() {
        let mut app = app();
        for c in "back".chars() {
            app.filter_input(c);
        }
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.selected_item().unwrap().text, "Background");

        app.clear_filter();
        assert_eq!(app.visible.len(), 3);
    }

    #[test]
    fn test_scroll_clamps_to_document() {
        let mut app = app();
        app.scroll_down(1000);
        assert_eq!(app.content_scroll, app.max_scroll());
        app.scroll_up(1000);
        assert_eq!(app.content_scroll, 0);
    }

    #[test]
    fn test_huge_page_clamps_content_height() {
        let page = scanner::scan_html("\n".repeat(70_000));
        let outline = Outline::build(&page.headings, 2);
        let app = App::new(
            page,
            outline,
            "big.html".to_string(),
            PathBuf::from("big.html"),
            Config::default(),
            ColorMode::Rgb,
        );
        assert_eq!(app.content_height, u16::MAX);
    }

    #[test]
    fn test_outline_navigation_bounds() {
        let mut app = app();
        app.previous_entry();
        assert_eq!(app.outline_state.selected(), Some(0));
        for _ in 0..10 {
            app.next_entry();
        }
        assert_eq!(app.outline_state.selected(), Some(2));
    }
}
