//! Focus ring for keyboard navigation between the controls of one scope
//!
//! Controls are visited in registration order and focus wraps at both ends.
//! Disabled controls stay in the ring but are skipped.
//!
//! # Example
//!
//! ```
//! use confirmkit::focus::FocusManager;
//!
//! let mut focus = FocusManager::new();
//! focus.register("cancel");
//! focus.register("ok");
//!
//! focus.focus("ok");
//! focus.focus_next(); // wraps to "cancel"
//! assert!(focus.is_focused("cancel"));
//! ```

/// Unique identifier for a focusable component
pub type ComponentId = String;

/// Focus navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Tab / Right
    Next,
    /// Shift+Tab / Left
    Previous,
}

#[derive(Debug, Clone)]
struct Slot {
    id: ComponentId,
    enabled: bool,
}

/// Tracks which control has focus within a focus scope (e.g. a dialog)
#[derive(Debug, Clone, Default)]
pub struct FocusManager {
    slots: Vec<Slot>,
    /// Index into `slots`
    current: Option<usize>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a control to the ring; registering an id twice is a no-op
    pub fn register(&mut self, id: impl Into<ComponentId>) {
        let id = id.into();
        if self.position(&id).is_none() {
            self.slots.push(Slot { id, enabled: true });
        }
    }

    /// Enable or disable a control; disabling the focused control blurs it
    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        let Some(idx) = self.position(id) else {
            return;
        };
        self.slots[idx].enabled = enabled;
        if !enabled && self.current == Some(idx) {
            self.current = None;
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    /// Focus a control by id; false if unknown or disabled
    pub fn focus(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) if self.slots[idx].enabled => {
                self.current = Some(idx);
                true
            }
            _ => false,
        }
    }

    pub fn blur(&mut self) {
        self.current = None;
    }

    pub fn focus_next(&mut self) -> bool {
        self.move_focus(FocusDirection::Next)
    }

    pub fn focus_prev(&mut self) -> bool {
        self.move_focus(FocusDirection::Previous)
    }

    /// Step to the next enabled control in `direction`, wrapping around
    ///
    /// With nothing focused, Next starts at the first control and Previous
    /// at the last. Returns false when no control is enabled.
    pub fn move_focus(&mut self, direction: FocusDirection) -> bool {
        let len = self.slots.len();
        if len == 0 {
            return false;
        }

        let start = match (self.current, direction) {
            (Some(idx), _) => idx,
            (None, FocusDirection::Next) => len - 1,
            (None, FocusDirection::Previous) => 0,
        };
        let step = |idx: usize| match direction {
            FocusDirection::Next => (idx + 1) % len,
            FocusDirection::Previous => (idx + len - 1) % len,
        };

        let mut idx = start;
        for _ in 0..len {
            idx = step(idx);
            if self.slots[idx].enabled {
                self.current = Some(idx);
                return true;
            }
        }
        false
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused() == Some(id)
    }

    pub fn focused(&self) -> Option<&str> {
        self.current.map(|idx| self.slots[idx].id.as_str())
    }

    /// Number of enabled controls
    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.enabled).count()
    }
}
