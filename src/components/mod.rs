//! Built-in UI components

pub mod button;
pub mod confirm_dialog;
pub mod content;
pub mod dialog;
pub mod icon;

pub use button::{Button, ButtonOverrides, ButtonProps, ClickHandler};
pub use confirm_dialog::{
    ConfirmAction, ConfirmDialog, ConfirmDialogState, ConfirmDialogStore, ConfirmParams,
    ConfirmRequest,
};
pub use content::{wrap_text, Content, PhysicalAlign};
pub use dialog::{Dialog, DialogCallback, DialogProps, Transition};
pub use icon::Icon;
