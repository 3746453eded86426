//! Modal "are you sure?" dialog
//!
//! Any part of the application asks for confirmation by calling
//! [`ConfirmDialogStore::open`] with a [`ConfirmRequest`]. A single
//! [`ConfirmDialog`] view subscribed to the store draws the prompt: icon,
//! message, a Cancel button and an OK button.
//!
//! Cancel closes the dialog. OK runs the request's action, shows a busy
//! spinner on the OK button until the action settles, then closes the dialog.
//! Errors and panics from the action are logged and otherwise ignored, so the
//! dialog always ends up closed and idle.
//!
//! The action's future is kept by the view and advanced by
//! [`ConfirmDialog::poll_action`], which the UI loop calls once per frame.
//! Callers that drive their own executor can await [`ConfirmDialog::confirm`]
//! instead.
//!
//! # Example
//!
//! ```
//! use confirmkit::components::confirm_dialog::{ConfirmDialog, ConfirmDialogStore, ConfirmRequest};
//!
//! let store = ConfirmDialogStore::new();
//! let mut view = ConfirmDialog::new(store.clone());
//!
//! store.open(ConfirmRequest::new().message("Delete 3 items?").on_confirm_sync(|| Ok(())));
//! assert!(view.activate_ok());
//! assert!(!store.is_open());
//! ```

mod request;
mod store;

pub use request::{ActionFuture, ConfirmAction, ConfirmParams, ConfirmRequest};
pub use store::{ConfirmDialogState, ConfirmDialogStore, SubscriptionId};

use crate::component::Component;
use crate::components::button::{Button, ButtonProps};
use crate::components::content::PhysicalAlign;
use crate::components::dialog::{Dialog, DialogProps, Transition};
use crate::context::{RenderContext, UseAccessibility, UseLocale};
use crate::event::{Event, EventHandler, Key};
use crate::focus::FocusManager;
use crate::i18n::{AccessibilityRole, Locale};
use crate::layout::{FlexDirection, FlexLayout, Justify, Rect, Size};
use crate::render::Renderer;
use crate::style::class_names;
use crate::theme::BorderStyle;
use anyhow::Result;
use futures_util::future::{FutureExt, LocalBoxFuture};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::task::Context;

const CANCEL: &str = "cancel";
const OK: &str = "ok";

/// Widest the dialog body grows before wrapping, before font scaling
const MAX_CONTENT_WIDTH: u16 = 60;
/// Columns between the icon and the message
const ICON_GAP: u16 = 1;

/// State shared with store listeners and in-flight actions
#[derive(Debug, Default)]
struct ViewState {
    saving: Cell<bool>,
    dirty: Cell<bool>,
}

impl ViewState {
    fn set_saving(&self, saving: bool) {
        if self.saving.replace(saving) != saving {
            self.dirty.set(true);
        }
    }
}

/// Clears the saving flag on every exit path of a confirm action
struct SavingGuard(Rc<ViewState>);

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.set_saving(false);
    }
}

type PendingActions = Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Mark saving, run `action` to settlement, reset saving, close the dialog
fn run_confirm(
    state: Rc<ViewState>,
    store: ConfirmDialogStore,
    action: ConfirmAction,
) -> impl Future<Output = ()> + 'static {
    state.set_saving(true);
    let guard = SavingGuard(state);
    tracing::debug!("confirm action started");

    async move {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| action.start())) {
            Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
            Err(payload) => Err(payload),
        };
        match outcome {
            Ok(Ok(())) => tracing::debug!("confirm action finished"),
            Ok(Err(err)) => tracing::warn!(error = %err, "confirm action failed; closing anyway"),
            Err(payload) => tracing::warn!(
                panic = panic_message(payload.as_ref()),
                "confirm action panicked; closing anyway"
            ),
        }

        drop(guard);
        store.close();
    }
}

/// View bound to a [`ConfirmDialogStore`]
pub struct ConfirmDialog {
    store: ConfirmDialogStore,
    subscription: SubscriptionId,
    state: Rc<ViewState>,
    actions: PendingActions,
    /// Pass-through chrome configuration; open flag and callbacks are filled per sync
    chrome_props: DialogProps,
    chrome: Dialog,
    cancel: Button,
    ok: Button,
    focus: FocusManager,
    params: ConfirmParams,
    locale: Locale,
    dirty: bool,
}

impl ConfirmDialog {
    pub fn new(store: ConfirmDialogStore) -> Self {
        let state = Rc::new(ViewState::default());
        let listener_state = state.clone();
        let subscription = store.subscribe(move || listener_state.dirty.set(true));

        let mut focus = FocusManager::new();
        focus.register(CANCEL);
        focus.register(OK);

        let locale = Locale::default();
        let mut view = ConfirmDialog {
            store,
            subscription,
            state,
            actions: Rc::new(RefCell::new(Vec::new())),
            chrome_props: DialogProps::default(),
            chrome: Dialog::new(DialogProps::default()),
            cancel: Button::new(ButtonProps::default()),
            ok: Button::new(ButtonProps::default()),
            focus,
            params: ConfirmParams::defaults(&locale),
            locale,
            dirty: true,
        };
        view.sync();
        view
    }

    /// Locale for default labels until the first render supplies one
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self.sync();
        self
    }

    fn map_chrome_props(mut self, f: impl FnOnce(DialogProps) -> DialogProps) -> Self {
        let props = std::mem::take(&mut self.chrome_props);
        self.chrome_props = f(props);
        self
    }

    pub fn with_class_name(self, class_name: &str) -> Self {
        self.map_chrome_props(|props| props.with_class_name(class_name))
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.map_chrome_props(|props| props.with_id(id))
    }

    /// Frame title; the localized "Confirm" when unset
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.map_chrome_props(|props| props.with_title(title))
    }

    pub fn with_border(self, border: BorderStyle) -> Self {
        self.map_chrome_props(|props| props.with_border(border))
    }

    pub fn with_close_on_escape(self, close: bool) -> Self {
        self.map_chrome_props(|props| props.with_close_on_escape(close))
    }

    pub fn with_close_on_backdrop(self, close: bool) -> Self {
        self.map_chrome_props(|props| props.with_close_on_backdrop(close))
    }

    pub fn store(&self) -> &ConfirmDialogStore {
        &self.store
    }

    /// Whether the dialog is currently shown
    pub fn is_open(&self) -> bool {
        self.chrome.is_open()
    }

    /// True while the OK action is in flight
    pub fn is_saving(&self) -> bool {
        self.state.saving.get()
    }

    /// Parameters the dialog is drawn with
    pub fn params(&self) -> &ConfirmParams {
        &self.params
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// Run the current request's action to completion and close the dialog
    ///
    /// Saving is set before this returns and cleared when the future
    /// completes or is dropped.
    pub fn confirm(&self) -> impl Future<Output = ()> + 'static {
        let action = self
            .store
            .request()
            .and_then(|request| request.on_confirm)
            .unwrap_or_default();
        run_confirm(self.state.clone(), self.store.clone(), action)
    }

    /// Activate the OK button as if clicked; false when closed or already saving
    pub fn activate_ok(&mut self) -> bool {
        self.sync();
        if !self.chrome.is_open() {
            return false;
        }
        let activated = self.ok.activate();
        self.poll_action();
        self.sync();
        activated
    }

    /// Activate the Cancel button as if clicked; false when closed
    pub fn cancel(&mut self) -> bool {
        self.sync();
        if !self.chrome.is_open() {
            return false;
        }
        let activated = self.cancel.activate();
        self.sync();
        activated
    }

    /// Advance in-flight actions; returns true while any is still pending
    pub fn poll_action(&mut self) -> bool {
        let mut futures = std::mem::take(&mut *self.actions.borrow_mut());
        let mut cx = Context::from_waker(futures_util::task::noop_waker_ref());
        futures.retain_mut(|fut| fut.as_mut().poll(&mut cx).is_pending());

        let mut actions = self.actions.borrow_mut();
        // Actions started while polling run after the older ones
        futures.append(&mut *actions);
        *actions = futures;
        !actions.is_empty()
    }

    pub fn has_pending_action(&self) -> bool {
        !self.actions.borrow().is_empty()
    }

    /// Re-read the store and rebuild chrome and button configuration
    fn sync(&mut self) {
        let snapshot = self.store.snapshot();
        let props = self.dialog_props(snapshot.is_open);
        let transition = self.chrome.set_props(props);
        if transition != Transition::Unchanged {
            self.dirty = true;
        }

        self.params = ConfirmParams::resolve(snapshot.request.as_ref(), &self.locale);
        self.update_buttons();

        if transition == Transition::Opened {
            self.focus_default();
        }
        self.apply_focus();
    }

    fn dialog_props(&self, is_open: bool) -> DialogProps {
        let state = self.state.clone();
        let store = self.store.clone();
        let title = self
            .chrome_props
            .title
            .clone()
            .unwrap_or_else(|| self.locale.translate("Confirm"));

        DialogProps {
            is_open,
            class_name: class_names(["ConfirmDialog", self.chrome_props.class_name.as_str()]),
            title: Some(title),
            role: AccessibilityRole::AlertDialog,
            on_close: Some(Rc::new(move || state.set_saving(false))),
            close: Some(Rc::new(move || store.close())),
            ..self.chrome_props.clone()
        }
    }

    fn update_buttons(&mut self) {
        let params = &self.params;

        let store = self.store.clone();
        let cancel = ButtonProps::new(params.label_cancel.clone())
            .class_name(CANCEL)
            .plain()
            .on_click(move || store.close())
            .merge(&params.cancel_button);

        let state = self.state.clone();
        let store = self.store.clone();
        let action = params.on_confirm.clone();
        let actions = self.actions.clone();
        let ok = ButtonProps::new(params.label_ok.clone())
            .class_name(OK)
            .primary()
            .auto_focus()
            .waiting(self.state.saving.get())
            .on_click(move || {
                if state.saving.get() {
                    return;
                }
                let fut = run_confirm(state.clone(), store.clone(), action.clone());
                actions.borrow_mut().push(fut.boxed_local());
            })
            .merge(&params.ok_button);

        self.focus.set_enabled(CANCEL, !cancel.disabled);
        self.focus.set_enabled(OK, !ok.disabled);
        self.cancel.set_props(cancel);
        self.ok.set_props(ok);
    }

    fn focus_default(&mut self) {
        if self.ok.props().auto_focus {
            self.focus.focus(OK);
        } else if self.cancel.props().auto_focus {
            self.focus.focus(CANCEL);
        } else {
            self.focus.blur();
        }
    }

    fn apply_focus(&mut self) {
        self.cancel.set_focused(self.focus.is_focused(CANCEL));
        self.ok.set_focused(self.focus.is_focused(OK));
    }

    fn handle_open_event(&mut self, event: &Event) -> bool {
        let rtl = self.locale.text_direction.is_rtl();
        match event {
            Event::Key(Key::Tab) => self.focus.focus_next(),
            Event::Key(Key::BackTab) => self.focus.focus_prev(),
            Event::Key(Key::Right) if rtl => self.focus.focus_prev(),
            Event::Key(Key::Right) => self.focus.focus_next(),
            Event::Key(Key::Left) if rtl => self.focus.focus_next(),
            Event::Key(Key::Left) => self.focus.focus_prev(),
            Event::Key(Key::Char('y')) | Event::Key(Key::Char('Y')) => {
                self.ok.activate();
                true
            }
            Event::Key(Key::Char('n')) | Event::Key(Key::Char('N')) => {
                self.cancel.activate();
                true
            }
            Event::Resize(..) => {
                self.dirty = true;
                false
            }
            _ => self.ok.handle_event(event) || self.cancel.handle_event(event),
        }
    }
}

impl Drop for ConfirmDialog {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

impl EventHandler for ConfirmDialog {
    fn handle_event(&mut self, event: &Event) -> bool {
        self.sync();
        if !self.chrome.is_open() {
            return false;
        }

        let consumed = self.handle_open_event(event) || self.chrome.handle_event(event);
        self.apply_focus();
        self.poll_action();
        self.sync();
        consumed
    }
}

impl Component for ConfirmDialog {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.locale = self.use_locale(ctx).clone();
        self.sync();

        let theme = ctx.theme;
        let params = self.params.clone();

        let icon_width = if params.icon.is_empty() {
            0
        } else {
            params.icon.natural_size().0
        };
        let icon_gap = if icon_width > 0 { ICON_GAP } else { 0 };
        let (chrome_width, _) = self.chrome.outer_size((0, 0), ctx);
        let max_content = bounds
            .width
            .saturating_sub(chrome_width)
            .min(self.use_accessibility(ctx).scale_dimension(MAX_CONTENT_WIDTH));

        let message_max = max_content.saturating_sub(icon_width + icon_gap).max(1);
        let (message_width, message_height) = params.message.measure(message_max);
        let (_, icon_height) = params.icon.natural_size();
        let body_height = message_height.max(icon_height).max(1);
        let buttons_width = self.cancel.width() + theme.button_gap + self.ok.width();

        let content = (
            (icon_width + icon_gap + message_width).max(buttons_width),
            body_height + 2,
        );
        let Some(area) = self.chrome.render_frame(renderer, bounds, content, ctx)? else {
            self.dirty = false;
            self.state.dirty.set(false);
            return Ok(());
        };

        let rtl = self.use_is_rtl(ctx);
        let (body, rest) = area.split_horizontal(body_height);
        let body_row = FlexLayout::new(FlexDirection::Row).gap(icon_gap);
        let (icon_rect, message_rect) = match (icon_width, rtl) {
            (0, _) => (None, body),
            (_, false) => {
                let rects = body_row.layout(body, &[Size::Fixed(icon_width), Size::Flex(1)]);
                (Some(rects[0]), rects[1])
            }
            (_, true) => {
                let rects = body_row.layout(body, &[Size::Flex(1), Size::Fixed(icon_width)]);
                (Some(rects[1]), rects[0])
            }
        };

        let text_style = theme.text_style();
        if let Some(icon_rect) = icon_rect {
            params
                .icon
                .render(renderer, icon_rect, ctx, &text_style, PhysicalAlign::Left)?;
        }
        let align = if rtl {
            PhysicalAlign::Right
        } else {
            PhysicalAlign::Left
        };
        params
            .message
            .render(renderer, message_rect, ctx, &text_style, align)?;

        if rest.height > 0 {
            let row = Rect::new(rest.x, rest.bottom() - 1, rest.width, 1);
            let (justify, order) = if rtl {
                (Justify::Start, [OK, CANCEL])
            } else {
                (Justify::End, [CANCEL, OK])
            };
            let sizes: Vec<Size> = order
                .iter()
                .map(|id| match *id {
                    OK => Size::Fixed(self.ok.width()),
                    _ => Size::Fixed(self.cancel.width()),
                })
                .collect();
            let rects = FlexLayout::new(FlexDirection::Row)
                .gap(theme.button_gap)
                .justify(justify)
                .layout(row, &sizes);

            for (id, rect) in order.iter().zip(rects) {
                match *id {
                    OK => self.ok.render(renderer, rect, ctx)?,
                    _ => self.cancel.render(renderer, rect, ctx)?,
                }
            }
        }

        self.dirty = false;
        self.state.dirty.set(false);
        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.state.dirty.get() || (self.is_open() && self.ok.is_dirty())
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::AlertDialog
    }

    fn name(&self) -> &str {
        "ConfirmDialog"
    }
}
