//! Shared confirm dialog state with change notification
//!
//! A [`ConfirmDialogStore`] is created once at startup and cloned into every
//! part of the application that needs to ask for confirmation. Clones share
//! the same state. Views subscribe to be told when it changes.

use super::request::ConfirmRequest;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`ConfirmDialogStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn()>;

/// Snapshot of the shared state
#[derive(Debug, Clone, Default)]
pub struct ConfirmDialogState {
    pub is_open: bool,
    /// Most recently opened request; kept after close
    pub request: Option<ConfirmRequest>,
}

struct Inner {
    state: RefCell<ConfirmDialogState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

/// Cloneable handle to the single confirm dialog state
#[derive(Clone)]
pub struct ConfirmDialogStore {
    inner: Rc<Inner>,
}

impl Default for ConfirmDialogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfirmDialogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmDialogStore")
            .field("state", &*self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl ConfirmDialogStore {
    /// Closed store with no request
    pub fn new() -> Self {
        ConfirmDialogStore {
            inner: Rc::new(Inner {
                state: RefCell::new(ConfirmDialogState::default()),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Show the dialog for `request`, replacing any request already shown
    ///
    /// A replaced request's action is dropped without running.
    pub fn open(&self, request: ConfirmRequest) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.is_open {
                tracing::debug!("replacing open confirmation request");
            }
            state.request = Some(request);
            state.is_open = true;
        }
        tracing::debug!("confirm dialog opened");
        self.notify();
    }

    /// Hide the dialog; the stored request is kept
    pub fn close(&self) {
        let was_open = std::mem::replace(&mut self.inner.state.borrow_mut().is_open, false);
        if was_open {
            tracing::debug!("confirm dialog closed");
        }
        self.notify();
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open
    }

    /// Current request, if one was ever opened
    pub fn request(&self) -> Option<ConfirmRequest> {
        self.inner.state.borrow().request.clone()
    }

    pub fn snapshot(&self) -> ConfirmDialogState {
        self.inner.state.borrow().clone()
    }

    /// Call `listener` after every `open`/`close`
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        let mut listeners = self.inner.listeners.borrow_mut();
        listeners.push((id, Rc::new(listener)));
        tracing::debug!(listeners = listeners.len(), "confirm dialog subscriber added");
        id
    }

    /// Remove a listener; returns false if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        before != listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self) {
        // Listeners may open, close or (un)subscribe re-entrantly
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::content::Content;

    #[test]
    fn test_open_and_close() {
        let store = ConfirmDialogStore::new();
        assert!(!store.is_open());
        assert!(store.request().is_none());

        store.open(ConfirmRequest::new().message("Delete 3 items?"));
        assert!(store.is_open());

        store.close();
        assert!(!store.is_open());
        // Request survives close so a closing frame still has content
        let request = store.request().unwrap();
        assert_eq!(request.message, Some(Content::text("Delete 3 items?")));
    }

    #[test]
    fn test_second_open_replaces_request() {
        let store = ConfirmDialogStore::new();
        store.open(ConfirmRequest::new().message("first"));
        store.open(ConfirmRequest::new().message("second").label_ok("Yes"));

        let state = store.snapshot();
        assert!(state.is_open);
        let request = state.request.unwrap();
        assert_eq!(request.message, Some(Content::text("second")));
        assert_eq!(request.label_ok, Some(Content::text("Yes")));
    }

    #[test]
    fn test_clones_share_state() {
        let store = ConfirmDialogStore::new();
        let handle = store.clone();
        handle.open(ConfirmRequest::new());
        assert!(store.is_open());
    }

    #[test]
    fn test_listeners_are_notified_until_unsubscribed() {
        let store = ConfirmDialogStore::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move || counter.set(counter.get() + 1));
        assert_eq!(store.subscriber_count(), 1);

        store.open(ConfirmRequest::new());
        store.close();
        assert_eq!(calls.get(), 2);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.open(ConfirmRequest::new());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_listener_may_close_reentrantly() {
        let store = ConfirmDialogStore::new();
        let handle = store.clone();
        store.subscribe(move || {
            if handle.is_open() {
                handle.close();
            }
        });

        store.open(ConfirmRequest::new());
        assert!(!store.is_open());
    }
}
