//! confirmkit - A minimalist, typography-driven TUI kit for "are you sure?" prompts
//!
//! A small terminal UI toolkit built around one reusable modal:
//! - Confirmation dialog with message, icon, OK/Cancel and an async OK action
//! - Shared dialog store with explicit change subscriptions
//! - Immediate mode rendering with retained component structure
//! - Theme colors degraded to the terminal's capabilities
//! - Localized default labels and right-to-left layout

pub mod component;
pub mod components;
pub mod context;
pub mod event;
pub mod focus;
pub mod i18n;
pub mod layout;
pub mod render;
pub mod style;
pub mod terminal;
pub mod theme;

// Re-export commonly used types
pub use component::Component;
pub use components::{
    Button, ButtonOverrides, ButtonProps, ConfirmAction, ConfirmDialog, ConfirmDialogStore,
    ConfirmRequest, Content, Dialog, DialogProps, Icon,
};
pub use context::{RenderContext, UseAccessibility, UseLocale, UseTheme};
pub use event::{Event, EventHandler, EventPoller, Key};
pub use focus::{ComponentId, FocusDirection, FocusManager};
pub use i18n::{AccessibilityRole, AccessibilitySettings, Locale, TextDirection};
pub use layout::Rect;
pub use render::{Renderer, Screen};
pub use style::{Selector, Style, StyleProperty, StyleRule, StyleSheet};
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{BorderChars, BorderStyle, Color, Theme};
