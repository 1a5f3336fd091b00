use crate::spy::SpyConfig;
use crate::tui::theme::ThemeName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub spy: SpySettings,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Outline and injection options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocConfig {
    /// Pages with fewer headings than this get no TOC.
    #[serde(default = "default_min_headings")]
    pub min_headings: usize,

    /// Class of the sidebar `<ul>` the TOC list is mirrored into.
    #[serde(default = "default_sidebar_class")]
    pub sidebar_class: String,
}

/// Scroll-spy geometry, in page pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpySettings {
    /// Fixed navigation bar height; the fallback when the site exposes no
    /// `--navbar-height` value.
    #[serde(default = "default_nav_offset")]
    pub nav_offset: u32,

    #[serde(default = "default_top_margin")]
    pub top_margin: u32,

    #[serde(default = "default_panel_reserve")]
    pub panel_reserve: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Outline pane width as a percentage of the terminal.
    #[serde(default = "default_outline_width")]
    pub outline_width: u16,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            min_headings: default_min_headings(),
            sidebar_class: default_sidebar_class(),
        }
    }
}

impl Default for SpySettings {
    fn default() -> Self {
        Self {
            nav_offset: default_nav_offset(),
            top_margin: default_top_margin(),
            panel_reserve: default_panel_reserve(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            outline_width: default_outline_width(),
        }
    }
}

fn default_min_headings() -> usize {
    2
}

fn default_sidebar_class() -> String {
    "toc-sidebar".to_string()
}

fn default_nav_offset() -> u32 {
    58
}

fn default_top_margin() -> u32 {
    20
}

fn default_panel_reserve() -> u32 {
    40
}

fn default_theme() -> String {
    "OceanDark".to_string()
}

fn default_outline_width() -> u16 {
    30
}

impl Config {
    /// Platform-specific config file path
    /// - macOS: ~/Library/Application Support/tocsmith/config.toml
    /// - Linux: ~/.config/tocsmith/config.toml
    /// - Windows: %APPDATA%/tocsmith/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tocsmith").join("config.toml"))
    }

    /// Load config from file, or return defaults if it is missing or broken.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                fs::read_to_string(&path)
                    .ok()
                    .and_then(|contents| toml::from_str(&contents).ok())
            })
            .unwrap_or_default()
    }

    /// Save config to file.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Spy geometry from the configured page-pixel values.
    pub fn spy_config(&self) -> SpyConfig {
        SpyConfig {
            nav_offset: self.spy.nav_offset,
            top_margin: self.spy.top_margin,
            panel_reserve: self.spy.panel_reserve,
        }
    }

    /// Parse theme name from string.
    pub fn theme_name(&self) -> ThemeName {
        match self.ui.theme.as_str() {
            "OceanDark" => ThemeName::OceanDark,
            "Nord" => ThemeName::Nord,
            "Paper" => ThemeName::Paper,
            _ => ThemeName::OceanDark,
        }
    }

    /// Update theme and save config.
    pub fn set_theme(&mut self, theme: ThemeName) -> Result<(), Box<dyn std::error::Error>> {
        self.ui.theme = match theme {
            ThemeName::OceanDark => "OceanDark",
            ThemeName::Nord => "Nord",
            ThemeName::Paper => "Paper",
        }
        .to_string();

        self.save()
    }

    /// Update outline width and save config.
    pub fn set_outline_width(&mut self, width: u16) -> Result<(), Box<dyn std::error::Error>> {
        self.ui.outline_width = width;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_constants() {
        let config = Config::default();
        assert_eq!(config.spy.nav_offset, 58);
        assert_eq!(config.spy.top_margin, 20);
        assert_eq!(config.spy.panel_reserve, 40);
        assert_eq!(config.toc.min_headings, 2);
        assert_eq!(config.toc.sidebar_class, "toc-sidebar");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[spy]\nnav_offset = 72\n").unwrap();
        assert_eq!(config.spy.nav_offset, 72);
        assert_eq!(config.spy.top_margin, 20);
        assert_eq!(config.ui.outline_width, 30);
    }

    #[test]
    fn test_spy_config_conversion() {
        let config = Config::default();
        let spy = config.spy_config();
        assert_eq!(spy.nav_offset, 58);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config: Config = toml::from_str("[ui]\ntheme = \"NoSuch\"\n").unwrap();
        assert_eq!(config.theme_name(), ThemeName::OceanDark);
    }
}
