//! Color themes for the preview panes.

use crate::tui::terminal_compat::ColorMode;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    OceanDark,
    Nord,
    Paper,
}

impl ThemeName {
    pub fn next(self) -> Self {
        match self {
            ThemeName::OceanDark => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Paper,
            ThemeName::Paper => ThemeName::OceanDark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::OceanDark => "OceanDark",
            ThemeName::Nord => "Nord",
            ThemeName::Paper => "Paper",
        }
    }
}

/// Colors used by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub heading_1: Color,
    pub heading_2: Color,
    pub heading_3: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Scroll-spy active entry highlight.
    pub active_bg: Color,
    pub active_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub title_fg: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::OceanDark => Self {
                background: Color::Rgb(18, 24, 32),
                foreground: Color::Rgb(200, 210, 220),
                heading_1: Color::Rgb(97, 175, 239),
                heading_2: Color::Rgb(152, 195, 121),
                heading_3: Color::Rgb(229, 192, 123),
                border_focused: Color::Rgb(97, 175, 239),
                border_unfocused: Color::Rgb(70, 82, 96),
                selection_bg: Color::Rgb(45, 60, 80),
                selection_fg: Color::Rgb(240, 245, 250),
                active_bg: Color::Rgb(33, 84, 120),
                active_fg: Color::Rgb(255, 255, 255),
                status_bar_bg: Color::Rgb(30, 40, 52),
                status_bar_fg: Color::Rgb(160, 175, 190),
                title_fg: Color::Rgb(97, 175, 239),
            },
            ThemeName::Nord => Self {
                background: Color::Rgb(46, 52, 64),
                foreground: Color::Rgb(216, 222, 233),
                heading_1: Color::Rgb(136, 192, 208),
                heading_2: Color::Rgb(163, 190, 140),
                heading_3: Color::Rgb(235, 203, 139),
                border_focused: Color::Rgb(136, 192, 208),
                border_unfocused: Color::Rgb(76, 86, 106),
                selection_bg: Color::Rgb(67, 76, 94),
                selection_fg: Color::Rgb(236, 239, 244),
                active_bg: Color::Rgb(94, 129, 172),
                active_fg: Color::Rgb(236, 239, 244),
                status_bar_bg: Color::Rgb(59, 66, 82),
                status_bar_fg: Color::Rgb(180, 190, 205),
                title_fg: Color::Rgb(136, 192, 208),
            },
            ThemeName::Paper => Self {
                background: Color::Rgb(250, 248, 240),
                foreground: Color::Rgb(60, 56, 50),
                heading_1: Color::Rgb(175, 60, 30),
                heading_2: Color::Rgb(40, 100, 60),
                heading_3: Color::Rgb(120, 90, 30),
                border_focused: Color::Rgb(175, 60, 30),
                border_unfocused: Color::Rgb(190, 185, 175),
                selection_bg: Color::Rgb(230, 222, 205),
                selection_fg: Color::Rgb(40, 36, 30),
                active_bg: Color::Rgb(215, 195, 160),
                active_fg: Color::Rgb(30, 26, 20),
                status_bar_bg: Color::Rgb(235, 230, 218),
                status_bar_fg: Color::Rgb(110, 100, 90),
                title_fg: Color::Rgb(175, 60, 30),
            },
        }
    }

    /// Downsample RGB colors to the 256-color cube for terminals without
    /// true color support.
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        if mode == ColorMode::Rgb {
            return self;
        }

        for color in [
            &mut self.background,
            &mut self.foreground,
            &mut self.heading_1,
            &mut self.heading_2,
            &mut self.heading_3,
            &mut self.border_focused,
            &mut self.border_unfocused,
            &mut self.selection_bg,
            &mut self.selection_fg,
            &mut self.active_bg,
            &mut self.active_fg,
            &mut self.status_bar_bg,
            &mut self.status_bar_fg,
            &mut self.title_fg,
        ] {
            *color = quantize(*color);
        }
        self
    }
}

fn quantize(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let step = |v: u8| (v as u16 * 5 / 255) as u8;
            Color::Indexed(16 + 36 * step(r) + 6 * step(g) + step(b))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_covers_all() {
        let start = ThemeName::OceanDark;
        let mut name = start;
        let mut seen = vec![];
        loop {
            seen.push(name.label());
            name = name.next();
            if name == start {
                break;
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_quantize_range() {
        match quantize(Color::Rgb(255, 255, 255)) {
            Color::Indexed(i) => assert_eq!(i, 231),
            other => panic!("expected indexed, got {other:?}"),
        }
        match quantize(Color::Rgb(0, 0, 0)) {
            Color::Indexed(i) => assert_eq!(i, 16),
            other => panic!("expected indexed, got {other:?}"),
        }
    }

    #[test]
    fn test_with_color_mode_rgb_is_identity() {
        let theme = Theme::from_name(ThemeName::Nord);
        let same = theme.with_color_mode(ColorMode::Rgb);
        assert_eq!(format!("{:?}", theme.background), format!("{:?}", same.background));
    }
}
