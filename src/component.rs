//! Component system - trait and lifecycle for UI elements

use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::i18n::AccessibilityRole;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Core component trait for all UI elements
///
/// Components use a hybrid approach:
/// - Retained: component structure and state live across frames
/// - Immediate: rendering happens fresh each frame via `render()`
pub trait Component: EventHandler {
    /// Render the component into the given rectangle
    ///
    /// The context provides access to theme, locale, accessibility settings
    /// and the application stylesheet.
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()>;

    /// Minimum size needed for this component
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Called when component is first mounted
    fn on_mount(&mut self) {}

    /// Called before component is unmounted
    fn on_unmount(&mut self) {}

    /// Mark component as needing redraw
    fn mark_dirty(&mut self) {}

    /// Check if component needs redraw
    fn is_dirty(&self) -> bool {
        true // Default: always redraw
    }

    /// Role announced to assistive technology
    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::None
    }

    /// Get component name for debugging and stylesheet matching
    fn name(&self) -> &str {
        "Component"
    }
}
