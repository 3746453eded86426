//! Modal dialog chrome
//!
//! Provides the frame every dialog shares:
//! - Centered box with border and optional title
//! - Open/closed state driven by the owner through [`DialogProps::is_open`]
//! - Escape and backdrop-click dismissal
//! - Focus trapping (every event is consumed while open)
//!
//! The chrome does not own the open flag. Dismissal calls the `close`
//! callback so the owner can update its state, and every transition from open
//! to closed (dismissal or the owner closing it) fires `on_close` once.

use crate::context::RenderContext;
use crate::event::{Event, Key, MouseEvent};
use crate::i18n::AccessibilityRole;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::style::{class_names, Selector};
use crate::theme::BorderStyle;
use anyhow::Result;
use std::fmt;
use std::rc::Rc;

/// Callback invoked by the chrome
pub type DialogCallback = Rc<dyn Fn()>;

/// Chrome configuration, supplied by the dialog's owner on every frame
#[derive(Clone)]
pub struct DialogProps {
    pub is_open: bool,
    pub class_name: String,
    pub id: Option<String>,
    pub title: Option<String>,
    /// Border override; the theme's dialog border when None
    pub border: Option<BorderStyle>,
    pub close_on_escape: bool,
    pub close_on_backdrop: bool,
    pub role: AccessibilityRole,
    /// Fired once whenever the dialog goes from open to closed
    pub on_close: Option<DialogCallback>,
    /// Asks the owner to close the dialog (Escape, backdrop click)
    pub close: Option<DialogCallback>,
}

impl Default for DialogProps {
    fn default() -> Self {
        DialogProps {
            is_open: false,
            class_name: String::new(),
            id: None,
            title: None,
            border: None,
            close_on_escape: true,
            close_on_backdrop: true,
            role: AccessibilityRole::Dialog,
            on_close: None,
            close: None,
        }
    }
}

impl fmt::Debug for DialogProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogProps")
            .field("is_open", &self.is_open)
            .field("class_name", &self.class_name)
            .field("id", &self.id)
            .field("title", &self.title)
            .field("border", &self.border)
            .field("close_on_escape", &self.close_on_escape)
            .field("close_on_backdrop", &self.close_on_backdrop)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl DialogProps {
    pub fn with_class_name(mut self, class_name: &str) -> Self {
        self.class_name = class_names([self.class_name.as_str(), class_name]);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    pub fn with_close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }
}

/// Open-state change observed when new props arrive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    Unchanged,
}

/// Dialog chrome
#[derive(Debug)]
pub struct Dialog {
    props: DialogProps,
    /// Box drawn on the last frame, for backdrop hit testing
    frame: Option<Rect>,
}

impl Dialog {
    pub fn new(props: DialogProps) -> Self {
        Dialog { props, frame: None }
    }

    pub fn props(&self) -> &DialogProps {
        &self.props
    }

    pub fn is_open(&self) -> bool {
        self.props.is_open
    }

    /// Frame drawn on the last render
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    /// Install the owner's latest props and report the open-state change
    pub fn set_props(&mut self, props: DialogProps) -> Transition {
        let was_open = self.props.is_open;
        self.props = props;
        match (was_open, self.props.is_open) {
            (false, true) => Transition::Opened,
            (true, false) => {
                self.closed();
                Transition::Closed
            }
            _ => Transition::Unchanged,
        }
    }

    fn closed(&mut self) {
        self.frame = None;
        tracing::debug!(class = %self.props.class_name, "dialog closed");
        if let Some(on_close) = self.props.on_close.clone() {
            on_close();
        }
    }

    /// Close from inside the chrome: ask the owner to close, then hide
    ///
    /// Props installed afterwards are compared against the closed state, so
    /// an owner that opens again reopens the chrome.
    pub fn dismiss(&mut self) {
        if !self.props.is_open {
            return;
        }
        tracing::debug!(class = %self.props.class_name, "dialog dismissed");
        if let Some(close) = self.props.close.clone() {
            close();
        }
        self.props.is_open = false;
        self.closed();
    }

    /// Handle an event while open; always consumes events when open
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.props.is_open {
            return false;
        }

        match event {
            Event::Key(Key::Esc) if self.props.close_on_escape => self.dismiss(),
            Event::Mouse(MouseEvent::Press(_, col, row)) if self.props.close_on_backdrop => {
                let inside = self.frame.map(|f| f.contains(*col, *row)).unwrap_or(true);
                if !inside {
                    self.dismiss();
                }
            }
            _ => {}
        }
        true
    }

    fn border(&self, ctx: &RenderContext) -> BorderStyle {
        self.props.border.unwrap_or(ctx.theme.dialog_border)
    }

    /// Outer size needed to hold content of the given size
    pub fn outer_size(&self, content: (u16, u16), ctx: &RenderContext) -> (u16, u16) {
        let border = if self.border(ctx) == BorderStyle::None { 0 } else { 2 };
        let chrome = border + ctx.theme.dialog_padding * 2;
        (content.0 + chrome, content.1 + chrome)
    }

    /// Draw the frame centered in `parent`, returning the content area
    ///
    /// Returns None (and draws nothing) while closed.
    pub fn render_frame(
        &mut self,
        renderer: &mut Renderer,
        parent: Rect,
        content: (u16, u16),
        ctx: &RenderContext,
    ) -> Result<Option<Rect>> {
        if !self.props.is_open {
            self.frame = None;
            return Ok(None);
        }

        let (width, height) = self.outer_size(content, ctx);
        let frame = parent.centered(width, height);
        self.frame = Some(frame);

        let theme = ctx.theme;
        let selectors =
            Selector::for_component("Dialog", &self.props.class_name, self.props.id.as_deref());
        let style = format!(
            "{}{}",
            theme.border_style(true),
            ctx.computed_style(&selectors).to_ansi(theme.capabilities())
        );

        let inner_width = frame.width.saturating_sub(2) as usize;
        match self.border(ctx).chars() {
            Some(chars) if frame.width >= 2 && frame.height >= 2 => {
                let top = match &self.props.title {
                    Some(title) => titled_rule(title, inner_width, chars.horizontal),
                    None => chars.horizontal.to_string().repeat(inner_width),
                };
                renderer.move_cursor(frame.x, frame.y)?;
                renderer.write_styled(
                    &format!("{}{}{}", chars.top_left, top, chars.top_right),
                    &style,
                )?;

                for row in 1..frame.height - 1 {
                    renderer.move_cursor(frame.x, frame.y + row)?;
                    renderer.write_styled(&chars.vertical.to_string(), &style)?;
                    renderer.write_repeated(' ', inner_width)?;
                    renderer.write_styled(&chars.vertical.to_string(), &style)?;
                }

                renderer.move_cursor(frame.x, frame.bottom() - 1)?;
                renderer.write_styled(
                    &format!(
                        "{}{}{}",
                        chars.bottom_left,
                        chars.horizontal.to_string().repeat(inner_width),
                        chars.bottom_right
                    ),
                    &style,
                )?;
                Ok(Some(frame.inner(1).inner(theme.dialog_padding)))
            }
            _ => {
                for row in 0..frame.height {
                    renderer.move_cursor(frame.x, frame.y + row)?;
                    renderer.write_repeated(' ', frame.width as usize)?;
                }
                Ok(Some(frame.inner(theme.dialog_padding)))
            }
        }
    }
}

/// Horizontal rule of `width` cells with a centered title
fn titled_rule(title: &str, width: usize, fill: char) -> String {
    if width < 3 {
        return fill.to_string().repeat(width);
    }
    let max_title = width.saturating_sub(2);
    let title: String = if title.chars().count() > max_title {
        let keep = max_title.saturating_sub(1);
        title.chars().take(keep).chain(std::iter::once('…')).collect()
    } else {
        title.to_string()
    };
    if title.is_empty() {
        return fill.to_string().repeat(width);
    }

    let label = format!(" {} ", title);
    let label_len = label.chars().count().min(width);
    let left = (width - label_len) / 2;
    let right = width - label_len - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        label,
        fill.to_string().repeat(right)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use crate::theme::Theme;
    use std::cell::Cell;

    fn counting(counter: &Rc<Cell<u32>>) -> DialogCallback {
        let counter = counter.clone();
        Rc::new(move || counter.set(counter.get() + 1))
    }

    #[test]
    fn test_transitions_fire_on_close_once() {
        let closes = Rc::new(Cell::new(0));
        let props = DialogProps {
            on_close: Some(counting(&closes)),
            ..Default::default()
        };
        let mut dialog = Dialog::new(props.clone());
        assert!(!dialog.is_open());

        let opened = DialogProps {
            is_open: true,
            ..props.clone()
        };
        assert_eq!(dialog.set_props(opened.clone()), Transition::Opened);
        assert_eq!(dialog.set_props(opened), Transition::Unchanged);
        assert_eq!(dialog.set_props(props.clone()), Transition::Closed);
        assert_eq!(dialog.set_props(props), Transition::Unchanged);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_escape_calls_close_then_on_close() {
        let closes = Rc::new(Cell::new(0));
        let close_requests = Rc::new(Cell::new(0));
        let props = DialogProps {
            is_open: true,
            on_close: Some(counting(&closes)),
            close: Some(counting(&close_requests)),
            ..Default::default()
        };
        let mut dialog = Dialog::new(props.clone());

        assert!(dialog.handle_event(&Event::Key(Key::Esc)));
        assert!(!dialog.is_open());
        assert_eq!(close_requests.get(), 1);
        assert_eq!(closes.get(), 1);

        // Owner acknowledges the close: no second on_close
        let closed = DialogProps {
            is_open: false,
            ..props.clone()
        };
        assert_eq!(dialog.set_props(closed), Transition::Unchanged);
        assert_eq!(closes.get(), 1);
        assert!(!dialog.handle_event(&Event::Key(Key::Esc)));
    }

    #[test]
    fn test_open_after_dismiss_reopens() {
        let props = DialogProps {
            is_open: true,
            ..Default::default()
        };
        let mut dialog = Dialog::new(props.clone());
        dialog.dismiss();
        assert!(!dialog.is_open());

        // Owner opened again before the chrome saw the close
        assert_eq!(dialog.set_props(props), Transition::Opened);
        assert!(dialog.is_open());
        assert!(dialog.handle_event(&Event::Key(Key::Enter)));
    }

    #[test]
    fn test_escape_can_be_disabled() {
        let mut dialog = Dialog::new(
            DialogProps {
                is_open: true,
                ..Default::default()
            }
            .with_close_on_escape(false),
        );
        // Still trapped, but stays open
        assert!(dialog.handle_event(&Event::Key(Key::Esc)));
        assert!(dialog.is_open());
    }

    #[test]
    fn test_render_frame_and_backdrop_click() {
        let theme = Theme::plain();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless_sized(40, 12);
        let mut dialog = Dialog::new(
            DialogProps {
                is_open: true,
                ..Default::default()
            }
            .with_title("Confirm"),
        );

        let content = dialog
            .render_frame(&mut renderer, Rect::fullscreen(40, 12), (10, 2), &ctx)
            .unwrap()
            .unwrap();
        // 10x2 content + padding 1 + border 1 on each side = 14x6, centered
        assert_eq!(dialog.frame(), Some(Rect::new(13, 3, 14, 6)));
        assert_eq!(content, Rect::new(15, 5, 10, 2));

        let screen = renderer.screen().unwrap();
        assert_eq!(screen.line(3).trim(), "╭─ Confirm ──╮");
        assert_eq!(screen.line(8).trim(), "╰────────────╯");

        // Click inside the box keeps it open, outside dismisses
        let inside = Event::Mouse(MouseEvent::Press(MouseButton::Left, 15, 5));
        assert!(dialog.handle_event(&inside));
        assert!(dialog.is_open());
        let outside = Event::Mouse(MouseEvent::Press(MouseButton::Left, 0, 0));
        assert!(dialog.handle_event(&outside));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_closed_dialog_draws_nothing() {
        let theme = Theme::plain();
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless_sized(20, 5);
        let mut dialog = Dialog::new(DialogProps::default());

        let content = dialog
            .render_frame(&mut renderer, Rect::fullscreen(20, 5), (5, 1), &ctx)
            .unwrap();
        assert!(content.is_none());
        assert_eq!(renderer.screen().unwrap().text().trim(), "");
    }

    #[test]
    fn test_titled_rule() {
        assert_eq!(titled_rule("Hi", 8, '─'), "── Hi ──");
        assert_eq!(titled_rule("Confirmation", 8, '-'), " Confi… ");
        assert_eq!(titled_rule("", 3, '-'), "---");
        assert_eq!(titled_rule("Confirm", 1, '-'), "-");
        assert_eq!(titled_rule("Confirm", 3, '-'), " … ");
    }
}
