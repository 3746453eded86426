//! Terminal abstraction - geometry, capabilities, and context

use anyhow::{Context, Result};

/// Terminal geometry in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Terminal width in columns (characters)
    pub cols: u16,
    /// Terminal height in rows (lines)
    pub rows: u16,
}

impl TerminalGeometry {
    /// Get current terminal geometry
    pub fn detect() -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;
        Ok(TerminalGeometry { cols, rows })
    }

    /// Fixed geometry, used by headless renderers
    pub fn fixed(cols: u16, rows: u16) -> Self {
        TerminalGeometry { cols, rows }
    }
}

/// Terminal color capability detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Supports 24-bit true color
    pub truecolor: bool,
    /// Supports 256 colors
    pub colors_256: bool,
    /// Inside tmux/screen multiplexer
    pub in_multiplexer: bool,
    /// Supports mouse events
    pub mouse: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from the environment
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let tmux = std::env::var("TMUX").is_ok();
        let kitty_window = std::env::var("KITTY_WINDOW_ID").is_ok();

        let truecolor =
            colorterm.contains("truecolor") || colorterm.contains("24bit") || kitty_window;

        // 256 color support is pretty universal now
        let colors_256 = term.contains("256") || truecolor;

        TerminalCapabilities {
            truecolor,
            colors_256,
            in_multiplexer: tmux,
            mouse: true,
        }
    }

    /// 16-color capabilities with no environment lookups
    pub fn basic() -> Self {
        TerminalCapabilities {
            truecolor: false,
            colors_256: false,
            in_multiplexer: false,
            mouse: true,
        }
    }
}

/// Complete terminal context combining geometry and capabilities
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Create a new terminal context by detecting current environment
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Context for offscreen rendering
    pub fn headless(cols: u16, rows: u16) -> Self {
        TerminalContext {
            geometry: TerminalGeometry::fixed(cols, rows),
            capabilities: TerminalCapabilities::basic(),
        }
    }

    /// Refresh geometry (e.g., after terminal resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_context() {
        let ctx = TerminalContext::headless(80, 24);
        assert_eq!(ctx.geometry.cols, 80);
        assert_eq!(ctx.geometry.rows, 24);
        assert!(!ctx.capabilities.truecolor);
    }

    #[test]
    fn test_capabilities_detect() {
        let caps = TerminalCapabilities::detect();
        // Truecolor implies 256 colors
        assert!(caps.colors_256 || !caps.truecolor);
    }
}
