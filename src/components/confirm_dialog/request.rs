//! Confirmation requests and their resolution against defaults

use crate::components::button::ButtonOverrides;
use crate::components::content::Content;
use crate::components::icon::Icon;
use crate::i18n::Locale;
use anyhow::Result;
use futures_util::future::{self, FutureExt, LocalBoxFuture};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// Future returned by a started confirm action
pub type ActionFuture = LocalBoxFuture<'static, Result<()>>;

/// Zero-argument action run when the user confirms
///
/// Actions may be synchronous or asynchronous; both are started through
/// [`ConfirmAction::start`], which yields a future to await.
#[derive(Clone)]
pub struct ConfirmAction(Rc<dyn Fn() -> ActionFuture>);

impl ConfirmAction {
    /// Wrap an async action
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<()>> + 'static,
    {
        ConfirmAction(Rc::new(move || action().boxed_local()))
    }

    /// Wrap a synchronous action; it runs when the action is started
    pub fn from_fn<F>(action: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        ConfirmAction(Rc::new(move || future::ready(action()).boxed_local()))
    }

    /// Action that does nothing and succeeds
    pub fn noop() -> Self {
        Self::from_fn(|| Ok(()))
    }

    /// Invoke the action, returning the future of its settlement
    pub fn start(&self) -> ActionFuture {
        (self.0)()
    }
}

impl Default for ConfirmAction {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfirmAction")
    }
}

/// Parameters of one confirmation prompt; absent fields use the defaults
#[derive(Debug, Clone, Default)]
pub struct ConfirmRequest {
    pub message: Option<Content>,
    pub icon: Option<Content>,
    pub label_ok: Option<Content>,
    pub label_cancel: Option<Content>,
    pub on_confirm: Option<ConfirmAction>,
    pub ok_button: Option<ButtonOverrides>,
    pub cancel_button: Option<ButtonOverrides>,
}

impl ConfirmRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<Content>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<Content>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn label_ok(mut self, label: impl Into<Content>) -> Self {
        self.label_ok = Some(label.into());
        self
    }

    pub fn label_cancel(mut self, label: impl Into<Content>) -> Self {
        self.label_cancel = Some(label.into());
        self
    }

    /// Async action run on OK
    pub fn on_confirm<F, Fut>(mut self, action: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<()>> + 'static,
    {
        self.on_confirm = Some(ConfirmAction::new(action));
        self
    }

    /// Synchronous action run on OK
    pub fn on_confirm_sync<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        self.on_confirm = Some(ConfirmAction::from_fn(action));
        self
    }

    pub fn ok_button(mut self, overrides: ButtonOverrides) -> Self {
        self.ok_button = Some(overrides);
        self
    }

    pub fn cancel_button(mut self, overrides: ButtonOverrides) -> Self {
        self.cancel_button = Some(overrides);
        self
    }
}

/// Effective parameters: defaults overlaid by a request's present fields
#[derive(Debug, Clone)]
pub struct ConfirmParams {
    pub message: Content,
    pub icon: Content,
    pub label_ok: Content,
    pub label_cancel: Content,
    pub on_confirm: ConfirmAction,
    pub ok_button: ButtonOverrides,
    pub cancel_button: ButtonOverrides,
}

impl ConfirmParams {
    /// Defaults: localized labels, big warning icon, no message, no-op action
    pub fn defaults(locale: &Locale) -> Self {
        ConfirmParams {
            message: Content::default(),
            icon: Content::Icon(Icon::warning()),
            label_ok: Content::text(locale.translate("Ok")),
            label_cancel: Content::text(locale.translate("Cancel")),
            on_confirm: ConfirmAction::noop(),
            ok_button: ButtonOverrides::default(),
            cancel_button: ButtonOverrides::default(),
        }
    }

    pub fn resolve(request: Option<&ConfirmRequest>, locale: &Locale) -> Self {
        let defaults = Self::defaults(locale);
        let Some(request) = request else {
            return defaults;
        };

        ConfirmParams {
            message: request.message.clone().unwrap_or(defaults.message),
            icon: request.icon.clone().unwrap_or(defaults.icon),
            label_ok: request.label_ok.clone().unwrap_or(defaults.label_ok),
            label_cancel: request.label_cancel.clone().unwrap_or(defaults.label_cancel),
            on_confirm: request.on_confirm.clone().unwrap_or(defaults.on_confirm),
            ok_button: request.ok_button.clone().unwrap_or(defaults.ok_button),
            cancel_button: request.cancel_button.clone().unwrap_or(defaults.cancel_button),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_defaults_are_localized() {
        let params = ConfirmParams::resolve(None, &Locale::default());
        assert_eq!(params.label_ok, Content::text("Ok"));
        assert_eq!(params.label_cancel, Content::text("Cancel"));
        assert_eq!(params.icon, Content::Icon(Icon::warning()));
        assert!(params.message.is_empty());

        let german = ConfirmParams::resolve(None, &Locale::from_string("de-DE"));
        assert_eq!(german.label_cancel, Content::text("Abbrechen"));
    }

    #[test]
    fn test_request_fields_win() {
        let request = ConfirmRequest::new()
            .message("Delete 3 items?")
            .label_ok("Delete")
            .icon(Icon::material("delete"));
        let params = ConfirmParams::resolve(Some(&request), &Locale::default());

        assert_eq!(params.message, Content::text("Delete 3 items?"));
        assert_eq!(params.label_ok, Content::text("Delete"));
        assert_eq!(params.icon, Content::Icon(Icon::material("delete")));
        // Absent fields fall back
        assert_eq!(params.label_cancel, Content::text("Cancel"));
        assert!(params.ok_button.is_empty());
    }

    #[test]
    fn test_sync_action_runs_when_started() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let action = ConfirmAction::from_fn(move || {
            counter.set(counter.get() + 1);
            Ok(())
        });
        assert_eq!(calls.get(), 0);

        let fut = action.start();
        assert_eq!(calls.get(), 1);
        assert!(pollster::block_on(fut).is_ok());
    }

    #[test]
    fn test_async_action_reports_errors() {
        let action = ConfirmAction::new(|| async { Err(anyhow::anyhow!("backend down")) });
        let err = pollster::block_on(action.start()).unwrap_err();
        assert_eq!(err.to_string(), "backend down");
        assert!(pollster::block_on(ConfirmAction::noop().start()).is_ok());
    }
}
