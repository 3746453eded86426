//! Rendering context - provides theme, locale, accessibility, and styles to components

use crate::i18n::{AccessibilitySettings, Locale};
use crate::style::{Selector, Style, StyleSheet};
use crate::theme::Theme;

/// Context passed down the component tree during rendering
#[derive(Clone)]
pub struct RenderContext<'a> {
    /// Current theme
    pub theme: &'a Theme,

    /// Locale for translation
    pub locale: &'a Locale,

    /// Accessibility settings
    pub accessibility: &'a AccessibilitySettings,

    /// Optional application stylesheet layered over the theme
    pub stylesheet: Option<&'a StyleSheet>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context from a theme
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext {
            theme,
            locale: &theme.locale,
            accessibility: &theme.accessibility,
            stylesheet: None,
        }
    }

    /// Create a child context with a stylesheet
    pub fn with_stylesheet(&self, stylesheet: &'a StyleSheet) -> Self {
        RenderContext {
            stylesheet: Some(stylesheet),
            ..self.clone()
        }
    }

    /// Create a child context with a different locale
    pub fn with_locale(&self, locale: &'a Locale) -> Self {
        RenderContext {
            locale,
            ..self.clone()
        }
    }

    /// Stylesheet rules matching the given selectors (empty without a stylesheet)
    pub fn computed_style(&self, selectors: &[Selector]) -> Style {
        self.stylesheet
            .map(|sheet| sheet.compute_style(selectors))
            .unwrap_or_default()
    }
}

/// Hook trait for accessing theme from context
pub trait UseTheme {
    fn use_theme<'a>(&self, ctx: &'a RenderContext) -> &'a Theme {
        ctx.theme
    }
}

/// Hook trait for accessing locale from context
pub trait UseLocale {
    fn use_locale<'a>(&self, ctx: &'a RenderContext) -> &'a Locale {
        ctx.locale
    }

    /// Translate a UI string with the context locale
    fn use_translation(&self, ctx: &RenderContext, key: &str) -> String {
        ctx.locale.translate(key)
    }

    fn use_is_rtl(&self, ctx: &RenderContext) -> bool {
        ctx.locale.text_direction.is_rtl()
    }
}

/// Hook trait for accessing accessibility settings from context
pub trait UseAccessibility {
    fn use_accessibility<'a>(&self, ctx: &'a RenderContext) -> &'a AccessibilitySettings {
        ctx.accessibility
    }

    fn use_reduced_motion(&self, ctx: &RenderContext) -> bool {
        ctx.accessibility.prefer_reduced_motion
    }
}

/// Auto-implement all hook traits for all components
impl<T> UseTheme for T {}
impl<T> UseLocale for T {}
impl<T> UseAccessibility for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;

    fn theme() -> Theme {
        Theme::with_settings(
            TerminalCapabilities::basic(),
            Locale::default(),
            AccessibilitySettings::new(),
        )
    }

    #[test]
    fn test_context_creation() {
        let theme = theme();
        let ctx = RenderContext::new(&theme);

        assert_eq!(ctx.theme as *const _, &theme as *const _);
        assert_eq!(ctx.locale as *const _, &theme.locale as *const _);
        assert!(ctx.stylesheet.is_none());
    }

    #[test]
    fn test_child_context_locale() {
        let theme = theme();
        let german = Locale::from_string("de-DE");
        let ctx = RenderContext::new(&theme);
        let child = ctx.with_locale(&german);

        struct Hooks;
        assert_eq!(Hooks.use_translation(&ctx, "Cancel"), "Cancel");
        assert_eq!(Hooks.use_translation(&child, "Cancel"), "Abbrechen");
        assert_eq!(child.theme as *const _, &theme as *const _);
    }

    #[test]
    fn test_computed_style_uses_stylesheet() {
        let theme = theme();
        let sheet = StyleSheet::new().style_class("ok", Style::new().bold(true));
        let ctx = RenderContext::new(&theme);

        let selectors = [Selector::class("ok")];
        assert!(ctx.computed_style(&selectors).is_empty());
        assert!(ctx
            .with_stylesheet(&sheet)
            .computed_style(&selectors)
            .has("bold"));
    }
}
