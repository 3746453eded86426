//! Push buttons with primary/plain variants and a waiting (busy) state
//!
//! A button is configured by [`ButtonProps`]. Callers that embed a button in a
//! larger component can pass [`ButtonOverrides`], which are merged field by
//! field over the component's own props with [`ButtonProps::merge`].

use crate::component::Component;
use crate::components::content::{Content, PhysicalAlign};
use crate::context::{RenderContext, UseAccessibility};
use crate::event::{Event, EventHandler, Key, MouseButton, MouseEvent};
use crate::i18n::AccessibilityRole;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::style::{class_names, Selector};
use anyhow::Result;
use std::fmt;
use std::rc::Rc;

/// Click callback shared between a button and whoever configured it
pub type ClickHandler = Rc<dyn Fn()>;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const STILL_SPINNER: char = '…';

/// Complete button configuration
#[derive(Clone, Default)]
pub struct ButtonProps {
    pub label: Content,
    pub class_name: String,
    pub id: Option<String>,
    /// Call-to-action styling
    pub primary: bool,
    /// Borderless secondary styling
    pub plain: bool,
    /// An operation started by this button is in flight; activation is ignored
    pub waiting: bool,
    pub disabled: bool,
    /// Take focus when the surrounding scope opens
    pub auto_focus: bool,
    pub on_click: Option<ClickHandler>,
}

impl fmt::Debug for ButtonProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonProps")
            .field("label", &self.label)
            .field("class_name", &self.class_name)
            .field("id", &self.id)
            .field("primary", &self.primary)
            .field("plain", &self.plain)
            .field("waiting", &self.waiting)
            .field("disabled", &self.disabled)
            .field("auto_focus", &self.auto_focus)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// Partial button configuration; every present field wins over the base props
#[derive(Clone, Default)]
pub struct ButtonOverrides {
    pub label: Option<Content>,
    pub class_name: Option<String>,
    pub id: Option<String>,
    pub primary: Option<bool>,
    pub plain: Option<bool>,
    pub waiting: Option<bool>,
    pub disabled: Option<bool>,
    pub auto_focus: Option<bool>,
    /// Runs before the base handler; it never disconnects it
    pub on_click: Option<ClickHandler>,
}

impl fmt::Debug for ButtonOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonOverrides")
            .field("label", &self.label)
            .field("class_name", &self.class_name)
            .field("id", &self.id)
            .field("primary", &self.primary)
            .field("plain", &self.plain)
            .field("waiting", &self.waiting)
            .field("disabled", &self.disabled)
            .field("auto_focus", &self.auto_focus)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl ButtonOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<Content>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = Some(plain);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = Some(auto_focus);
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.class_name.is_none()
            && self.id.is_none()
            && self.primary.is_none()
            && self.plain.is_none()
            && self.waiting.is_none()
            && self.disabled.is_none()
            && self.auto_focus.is_none()
            && self.on_click.is_none()
    }
}

impl ButtonProps {
    pub fn new(label: impl Into<Content>) -> Self {
        ButtonProps {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn class_name(mut self, class_name: &str) -> Self {
        self.class_name = class_names([self.class_name.as_str(), class_name]);
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn plain(mut self) -> Self {
        self.plain = true;
        self
    }

    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }

    pub fn auto_focus(mut self) -> Self {
        self.auto_focus = true;
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Layer overrides on top of these props
    ///
    /// Base values apply first and each field present in `overrides` replaces
    /// the base value. Click handlers are chained instead: the override's
    /// handler runs, then the base handler.
    pub fn merge(mut self, overrides: &ButtonOverrides) -> Self {
        if let Some(label) = &overrides.label {
            self.label = label.clone();
        }
        if let Some(class_name) = &overrides.class_name {
            self.class_name = class_name.clone();
        }
        if let Some(id) = &overrides.id {
            self.id = Some(id.clone());
        }
        self.primary = overrides.primary.unwrap_or(self.primary);
        self.plain = overrides.plain.unwrap_or(self.plain);
        self.waiting = overrides.waiting.unwrap_or(self.waiting);
        self.disabled = overrides.disabled.unwrap_or(self.disabled);
        self.auto_focus = overrides.auto_focus.unwrap_or(self.auto_focus);

        self.on_click = match (overrides.on_click.clone(), self.on_click.take()) {
            (Some(extra), Some(base)) => {
                let chained: ClickHandler = Rc::new(move || {
                    extra();
                    base();
                });
                Some(chained)
            }
            (extra, base) => extra.or(base),
        };
        self
    }
}

/// A clickable button
#[derive(Debug)]
pub struct Button {
    props: ButtonProps,
    focused: bool,
    /// Where the button was last drawn, for mouse hit testing
    bounds: Option<Rect>,
    spinner_frame: usize,
    dirty: bool,
}

impl Button {
    pub fn new(props: ButtonProps) -> Self {
        Button {
            props,
            focused: false,
            bounds: None,
            spinner_frame: 0,
            dirty: true,
        }
    }

    pub fn props(&self) -> &ButtonProps {
        &self.props
    }

    pub fn set_props(&mut self, props: ButtonProps) {
        self.props = props;
        self.dirty = true;
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.dirty = true;
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether activation would run the click handler
    pub fn is_interactive(&self) -> bool {
        !self.props.disabled && !self.props.waiting
    }

    /// Run the click handler; returns false when disabled or waiting
    pub fn activate(&mut self) -> bool {
        if !self.is_interactive() {
            tracing::debug!(class = %self.props.class_name, "ignoring activation of inactive button");
            return false;
        }
        if let Some(handler) = self.props.on_click.clone() {
            handler();
        }
        true
    }

    /// Columns needed to draw the button
    pub fn width(&self) -> u16 {
        let (label_width, _) = self.props.label.natural_size();
        let spinner = if self.props.waiting { 2 } else { 0 };
        label_width + spinner + 4
    }

    /// Last drawn position, if any
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn hit(&self, col: u16, row: u16) -> bool {
        self.bounds.map(|b| b.contains(col, row)).unwrap_or(false)
    }

    fn face(&mut self, reduced_motion: bool) -> String {
        let label = self.props.label.as_text();
        let label = label.lines().next().unwrap_or_default();
        let (open, close) = if self.focused { ('▸', '◂') } else { ('[', ']') };

        if self.props.waiting {
            let spinner = if reduced_motion {
                STILL_SPINNER
            } else {
                let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                frame
            };
            format!("{} {} {} {}", open, spinner, label, close)
        } else {
            format!("{} {} {}", open, label, close)
        }
    }

    fn style(&self, ctx: &RenderContext) -> String {
        let theme = ctx.theme;
        let mut style = if self.props.waiting {
            theme.waiting_button_style()
        } else if self.props.primary {
            theme.primary_button_style()
        } else {
            theme.plain_button_style()
        };
        if self.props.disabled {
            style.push_str("\x1b[2m");
        }
        if self.focused {
            style.push_str("\x1b[1m");
        }

        let selectors = Selector::for_component(
            "Button",
            &self.props.class_name,
            self.props.id.as_deref(),
        );
        style.push_str(&ctx.computed_style(&selectors).to_ansi(theme.capabilities()));
        style
    }
}

impl EventHandler for Button {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(Key::Enter) | Event::Key(Key::Char(' ')) if self.focused => {
                self.activate();
                true
            }
            Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row)) if self.hit(*col, *row) => {
                self.activate();
                true
            }
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.set_focused(true);
    }

    fn on_blur(&mut self) {
        self.set_focused(false);
    }
}

impl Component for Button {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let width = self.width().min(bounds.width);
        let area = Rect::new(bounds.x, bounds.y, width, bounds.height.min(1));
        self.bounds = Some(area);

        let reduced_motion = self.use_reduced_motion(ctx);
        let face = Content::text(self.face(reduced_motion));
        let style = self.style(ctx);
        face.render(renderer, area, ctx, &style, PhysicalAlign::Left)?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.width(), 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        // The spinner animates every frame
        self.dirty || self.props.waiting
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Button
    }

    fn name(&self) -> &str {
        "Button"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_merge_overrides_win_per_field() {
        let base = ButtonProps::new("Ok").class_name("ok").primary().auto_focus();
        let overrides = ButtonOverrides::new().label("Delete").class_name("danger");

        let merged = base.merge(&overrides);
        assert_eq!(merged.label, Content::text("Delete"));
        assert_eq!(merged.class_name, "danger");
        // Untouched fields keep the base value
        assert!(merged.primary);
        assert!(merged.auto_focus);
        assert!(!merged.disabled);
    }

    #[test]
    fn test_merge_empty_overrides_is_identity() {
        let overrides = ButtonOverrides::new();
        assert!(overrides.is_empty());

        let merged = ButtonProps::new("Cancel").plain().merge(&overrides);
        assert_eq!(merged.label, Content::text("Cancel"));
        assert!(merged.plain);
        assert!(merged.on_click.is_none());
    }

    #[test]
    fn test_merge_chains_click_handlers() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let base_calls = calls.clone();
        let extra_calls = calls.clone();

        let merged = ButtonProps::new("Ok")
            .on_click(move || base_calls.borrow_mut().push("base"))
            .merge(&ButtonOverrides::new().on_click(move || extra_calls.borrow_mut().push("extra")));

        let mut button = Button::new(merged);
        assert!(button.activate());
        assert_eq!(*calls.borrow(), vec!["extra", "base"]);
    }

    #[test]
    fn test_waiting_and_disabled_ignore_activation() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let props = ButtonProps::new("Ok").on_click(move || counter.set(counter.get() + 1));

        let mut button = Button::new(props.clone().waiting(true));
        assert!(!button.activate());

        let mut button = Button::new(props.merge(&ButtonOverrides::new().disabled(true)));
        assert!(!button.activate());
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_keyboard_and_mouse_activation() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut button =
            Button::new(ButtonProps::new("Ok").on_click(move || counter.set(counter.get() + 1)));

        let theme = Theme::plain();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless_sized(20, 2);
        button
            .render(&mut renderer, Rect::new(2, 1, 10, 1), &ctx)
            .unwrap();

        // Unfocused buttons ignore Enter
        assert!(!button.handle_event(&Event::Key(Key::Enter)));

        button.on_focus();
        assert!(button.handle_event(&Event::Key(Key::Enter)));
        assert!(button.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 3, 1))));
        assert!(!button.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 15, 1))));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_render_faces() {
        let theme = Theme::plain();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless_sized(20, 3);

        let mut button = Button::new(ButtonProps::new("Ok"));
        assert_eq!(button.width(), 6);
        button
            .render(&mut renderer, Rect::new(0, 0, 20, 1), &ctx)
            .unwrap();

        button.set_focused(true);
        button
            .render(&mut renderer, Rect::new(0, 1, 20, 1), &ctx)
            .unwrap();

        let mut waiting = Button::new(ButtonProps::new("Ok").waiting(true));
        assert_eq!(waiting.width(), 8);
        assert!(waiting.is_dirty());
        waiting
            .render(&mut renderer, Rect::new(0, 2, 20, 1), &ctx)
            .unwrap();

        let screen = renderer.screen().unwrap();
        assert_eq!(screen.line(0), "[ Ok ]");
        assert_eq!(screen.line(1), "▸ Ok ◂");
        assert_eq!(screen.line(2), "[ ⠋ Ok ]");
    }
}
