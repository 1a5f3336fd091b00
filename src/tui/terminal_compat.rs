//! Terminal color capability detection.

/// How colors are emitted to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// True color (16M colors).
    Rgb,
    /// 256-color palette.
    Indexed256,
}

/// Detected terminal capabilities.
#[derive(Debug, Clone, Copy)]
pub struct TerminalCapabilities {
    pub recommended_color_mode: ColorMode,
}

impl TerminalCapabilities {
    /// Probe the terminal via environment heuristics.
    pub fn detect() -> Self {
        let recommended_color_mode = match supports_color::on(supports_color::Stream::Stdout) {
            Some(level) if level.has_16m => ColorMode::Rgb,
            _ => ColorMode::Indexed256,
        };
        Self {
            recommended_color_mode,
        }
    }
}
