//! Theming system with automatic color degradation

mod color;

pub use color::{AnsiColor, Color};

use crate::i18n::{AccessibilitySettings, Locale, TextDirection};
use crate::terminal::TerminalCapabilities;

/// Border style for components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    None,
    Single,
    Double,
    #[default]
    Rounded,
    Heavy,
    Ascii,
}

impl BorderStyle {
    /// Border characters, or None for a borderless box
    pub fn chars(&self) -> Option<BorderChars> {
        let chars = match self {
            BorderStyle::None => return None,
            BorderStyle::Single => BorderChars::new('─', '│', ['┌', '┐', '└', '┘']),
            BorderStyle::Double => BorderChars::new('═', '║', ['╔', '╗', '╚', '╝']),
            BorderStyle::Rounded => BorderChars::new('─', '│', ['╭', '╮', '╰', '╯']),
            BorderStyle::Heavy => BorderChars::new('━', '┃', ['┏', '┓', '┗', '┛']),
            BorderStyle::Ascii => BorderChars::new('-', '|', ['+', '+', '+', '+']),
        };
        Some(chars)
    }
}

/// Border characters for drawing boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    fn new(horizontal: char, vertical: char, corners: [char; 4]) -> Self {
        let [top_left, top_right, bottom_left, bottom_right] = corners;
        BorderChars {
            horizontal,
            vertical,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }
}

/// Theme defining colors and typography for UI components
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_fg: Color,
    pub error_fg: Color,
    pub warning_fg: Color,
    pub info_fg: Color,

    pub border_color: Color,
    pub focus_border_color: Color,

    pub primary_fg: Color,
    pub primary_bg: Color,
    pub plain_fg: Color,
    pub waiting_fg: Color,

    pub dialog_border: BorderStyle,
    pub dialog_padding: u16,
    pub button_gap: u16,

    pub text_direction: TextDirection,
    pub locale: Locale,

    pub accessibility: AccessibilitySettings,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create a new theme with terminal capabilities, locale and accessibility from the environment
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self::with_settings(caps, Locale::from_env(), AccessibilitySettings::from_env())
    }

    /// Create a theme with explicit locale and accessibility settings
    pub fn with_settings(
        caps: TerminalCapabilities,
        locale: Locale,
        accessibility: AccessibilitySettings,
    ) -> Self {
        let text_direction = locale.text_direction;

        Theme {
            text_fg: Color::white(),
            error_fg: Color::rgb(255, 100, 100),
            warning_fg: Color::rgb(255, 200, 100),
            info_fg: Color::rgb(100, 150, 255),

            border_color: Color::dark_gray(),
            focus_border_color: Color::rgb(100, 150, 255),

            primary_fg: Color::white(),
            primary_bg: Color::rgb(60, 90, 200),
            plain_fg: Color::rgb(200, 200, 210),
            waiting_fg: Color::dark_gray(),

            dialog_border: BorderStyle::Rounded,
            dialog_padding: 1,
            button_gap: 2,

            text_direction,
            locale,

            accessibility,

            caps,
        }
    }

    /// 16-color theme with default locale and accessibility, ignoring the environment
    pub fn plain() -> Self {
        Self::with_settings(
            TerminalCapabilities::basic(),
            Locale::default(),
            AccessibilitySettings::new(),
        )
    }

    /// Terminal capabilities this theme degrades colors for
    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.caps
    }

    pub fn text_style(&self) -> String {
        self.text_fg.degrade(&self.caps)
    }

    pub fn error_style(&self) -> String {
        self.error_fg.degrade(&self.caps)
    }

    pub fn warning_style(&self) -> String {
        self.warning_fg.degrade(&self.caps)
    }

    pub fn info_style(&self) -> String {
        self.info_fg.degrade(&self.caps)
    }

    pub fn border_style(&self, focused: bool) -> String {
        if focused {
            self.focus_border_color.degrade(&self.caps)
        } else {
            self.border_color.degrade(&self.caps)
        }
    }

    /// Style for the primary (call-to-action) button
    pub fn primary_button_style(&self) -> String {
        let mut style = format!(
            "{}{}",
            self.primary_fg.degrade(&self.caps),
            self.primary_bg.bg(&self.caps)
        );
        if self.accessibility.high_contrast {
            style.push_str("\x1b[1m");
        }
        style
    }

    /// Style for plain (secondary) buttons
    pub fn plain_button_style(&self) -> String {
        self.plain_fg.degrade(&self.caps)
    }

    /// Style for buttons with an operation in flight
    pub fn waiting_button_style(&self) -> String {
        format!("{}\x1b[2m", self.waiting_fg.degrade(&self.caps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::with_settings(
            TerminalCapabilities::basic(),
            Locale::default(),
            AccessibilitySettings::new(),
        )
    }

    #[test]
    fn test_theme_styles() {
        let theme = theme();

        assert_ne!(theme.border_style(true), theme.border_style(false));
        assert!(theme.waiting_button_style().contains("\x1b[2m"));
    }

    #[test]
    fn test_high_contrast_primary_button_is_bold() {
        let mut theme = theme();
        assert!(!theme.primary_button_style().contains("\x1b[1m"));

        theme.accessibility.high_contrast = true;
        assert!(theme.primary_button_style().contains("\x1b[1m"));
    }

    #[test]
    fn test_border_chars() {
        assert!(BorderStyle::None.chars().is_none());
        let rounded = BorderStyle::Rounded.chars().unwrap();
        assert_eq!(rounded.top_left, '╭');
        assert_eq!(BorderStyle::Ascii.chars().unwrap().vertical, '|');
    }

    #[test]
    fn test_rtl_locale_sets_direction() {
        let theme = Theme::with_settings(
            TerminalCapabilities::basic(),
            Locale::from_string("he-IL"),
            AccessibilitySettings::new(),
        );
        assert!(theme.text_direction.is_rtl());
    }
}
