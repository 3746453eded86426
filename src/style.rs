//! Class-based style system for components
//!
//! Components carry space-separated class names (like CSS `className`).
//! A [`StyleSheet`] maps selectors to [`Style`]s that are layered on top of
//! the theme's defaults at render time.

use crate::terminal::TerminalCapabilities;
use crate::theme::Color;
use std::collections::BTreeMap;

/// Join class names, skipping empty and missing entries
///
/// ```
/// use confirmkit::style::class_names;
///
/// assert_eq!(class_names(["ConfirmDialog", "", "danger"]), "ConfirmDialog danger");
/// ```
pub fn class_names<'a, I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a str>>,
{
    names
        .into_iter()
        .filter_map(Into::into)
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A style property that can be applied to components
#[derive(Debug, Clone, PartialEq)]
pub enum StyleProperty {
    Color(Color),
    Background(Color),
    Bold(bool),
    Dim(bool),
    Underline(bool),
    Reverse(bool),
}

/// A collection of style properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    properties: BTreeMap<&'static str, StyleProperty>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, key: &'static str, property: StyleProperty) -> Self {
        self.properties.insert(key, property);
        self
    }

    pub fn color(self, color: Color) -> Self {
        self.with("color", StyleProperty::Color(color))
    }

    pub fn background(self, color: Color) -> Self {
        self.with("background", StyleProperty::Background(color))
    }

    pub fn bold(self, bold: bool) -> Self {
        self.with("bold", StyleProperty::Bold(bold))
    }

    pub fn dim(self, dim: bool) -> Self {
        self.with("dim", StyleProperty::Dim(dim))
    }

    pub fn underline(self, underline: bool) -> Self {
        self.with("underline", StyleProperty::Underline(underline))
    }

    pub fn reverse(self, reverse: bool) -> Self {
        self.with("reverse", StyleProperty::Reverse(reverse))
    }

    pub fn get(&self, key: &str) -> Option<&StyleProperty> {
        self.properties.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Merge another style into this one (other takes precedence)
    pub fn merge(mut self, other: &Style) -> Self {
        for (key, value) in &other.properties {
            self.properties.insert(key, value.clone());
        }
        self
    }

    /// ANSI escape sequence for this style
    pub fn to_ansi(&self, caps: &TerminalCapabilities) -> String {
        self.properties
            .values()
            .map(|property| match property {
                StyleProperty::Color(c) => c.degrade(caps),
                StyleProperty::Background(c) => c.bg(caps),
                StyleProperty::Bold(true) => "\x1b[1m".to_string(),
                StyleProperty::Dim(true) => "\x1b[2m".to_string(),
                StyleProperty::Underline(true) => "\x1b[4m".to_string(),
                StyleProperty::Reverse(true) => "\x1b[7m".to_string(),
                _ => String::new(),
            })
            .collect()
    }
}

/// Selector for matching components
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Match by component name
    Name(String),
    /// Match by class name
    Class(String),
    /// Match by unique ID
    Id(String),
}

impl Selector {
    pub fn name(name: impl Into<String>) -> Self {
        Selector::Name(name.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    /// Selectors for a component name plus its class list and optional id
    pub fn for_component(name: &str, class_name: &str, id: Option<&str>) -> Vec<Selector> {
        std::iter::once(Selector::name(name))
            .chain(class_name.split_whitespace().map(Selector::class))
            .chain(id.map(Selector::id))
            .collect()
    }
}

/// A style rule that applies to matching components
#[derive(Debug, Clone)]
pub struct StyleRule {
    selector: Selector,
    style: Style,
    /// Higher wins; ties resolve in insertion order
    priority: u16,
}

impl StyleRule {
    pub fn new(selector: Selector, style: Style) -> Self {
        StyleRule {
            selector,
            style,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority;
        self
    }
}

/// A collection of style rules
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn style_name(self, name: &str, style: Style) -> Self {
        self.add_rule(StyleRule::new(Selector::name(name), style))
    }

    pub fn style_class(self, class: &str, style: Style) -> Self {
        self.add_rule(StyleRule::new(Selector::class(class), style))
    }

    pub fn style_id(self, id: &str, style: Style) -> Self {
        self.add_rule(StyleRule::new(Selector::id(id), style))
    }

    /// Compute the final style for a component by merging all matching rules
    pub fn compute_style(&self, selectors: &[Selector]) -> Style {
        let mut matching: Vec<_> = self
            .rules
            .iter()
            .filter(|rule| selectors.contains(&rule.selector))
            .collect();

        // Stable sort: lowest priority first so higher priority overrides
        matching.sort_by_key(|rule| rule.priority);

        matching
            .into_iter()
            .fold(Style::new(), |style, rule| style.merge(&rule.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(class_names(["ConfirmDialog"]), "ConfirmDialog");
        assert_eq!(class_names([Some("a"), None, Some("b  c")]), "a b c");
        assert_eq!(class_names(Vec::<&str>::new()), "");
        assert_eq!(class_names(["", " "]), "");
    }

    #[test]
    fn test_style_merge() {
        let merged = Style::new()
            .bold(true)
            .color(Color::white())
            .merge(&Style::new().color(Color::black()).dim(true));

        assert_eq!(merged.get("color"), Some(&StyleProperty::Color(Color::black())));
        assert!(merged.has("bold"));
        assert!(merged.has("dim"));
    }

    #[test]
    fn test_stylesheet_priority() {
        let stylesheet = StyleSheet::new()
            .add_rule(
                StyleRule::new(Selector::class("ok"), Style::new().bold(false)).with_priority(10),
            )
            .add_rule(StyleRule::new(Selector::class("ok"), Style::new().bold(true)));

        let style = stylesheet.compute_style(&[Selector::class("ok")]);
        assert_eq!(style.get("bold"), Some(&StyleProperty::Bold(false)));
    }

    #[test]
    fn test_selectors_for_component() {
        let selectors = Selector::for_component("Button", "ok danger", Some("delete"));
        assert_eq!(
            selectors,
            vec![
                Selector::name("Button"),
                Selector::class("ok"),
                Selector::class("danger"),
                Selector::id("delete"),
            ]
        );

        let stylesheet = StyleSheet::new()
            .style_class("danger", Style::new().underline(true))
            .style_name("Dialog", Style::new().bold(true))
            .style_id("delete", Style::new().reverse(true))
            .style_id("rename", Style::new().dim(true));
        let style = stylesheet.compute_style(&selectors);
        assert!(style.has("underline"));
        assert!(style.has("reverse"));
        assert!(!style.has("bold"));
        assert!(!style.has("dim"));
    }

    #[test]
    fn test_to_ansi() {
        let caps = TerminalCapabilities::basic();
        let ansi = Style::new().bold(true).dim(false).to_ansi(&caps);
        assert_eq!(ansi, "\x1b[1m");
    }
}
