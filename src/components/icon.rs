//! Material-style icons rendered as terminal glyphs

use crate::component::Component;
use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::i18n::AccessibilityRole;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::style::Selector;
use anyhow::Result;

/// Known material names and their glyphs
const GLYPHS: &[(&str, char)] = &[
    ("warning", '⚠'),
    ("error", '✖'),
    ("info", 'ℹ'),
    ("help", '?'),
    ("check", '✔'),
    ("delete", '✗'),
    ("close", '×'),
];

/// Glyph drawn for material names we don't know
const FALLBACK_GLYPH: char = '•';

/// An icon identified by its material name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    material: String,
    big: bool,
}

impl Icon {
    pub fn material(name: impl Into<String>) -> Self {
        Icon {
            material: name.into(),
            big: false,
        }
    }

    /// The standard icon shown by confirmation prompts
    pub fn warning() -> Self {
        Self::material("warning").big()
    }

    /// Render padded and bold, for use beside a block of text
    pub fn big(mut self) -> Self {
        self.big = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.material
    }

    pub fn is_big(&self) -> bool {
        self.big
    }

    pub fn glyph(&self) -> char {
        GLYPHS
            .iter()
            .find(|(name, _)| *name == self.material)
            .map(|(_, glyph)| *glyph)
            .unwrap_or(FALLBACK_GLYPH)
    }

    /// Text drawn for this icon
    pub fn text(&self) -> String {
        if self.big {
            format!(" {} ", self.glyph())
        } else {
            self.glyph().to_string()
        }
    }

    pub fn width(&self) -> u16 {
        if self.big {
            3
        } else {
            1
        }
    }

    /// Theme style for this icon, with stylesheet rules for `Icon`/the material name applied
    pub fn style(&self, ctx: &RenderContext) -> String {
        let theme = ctx.theme;
        let mut style = match self.material.as_str() {
            "warning" => theme.warning_style(),
            "error" | "delete" => theme.error_style(),
            "info" | "help" => theme.info_style(),
            _ => theme.text_style(),
        };
        if self.big {
            style.push_str("\x1b[1m");
        }

        let selectors = [Selector::name("Icon"), Selector::class(self.material.as_str())];
        style.push_str(
            &ctx.computed_style(&selectors)
                .to_ansi(theme.capabilities()),
        );
        style
    }
}

impl EventHandler for Icon {}

impl Component for Icon {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if bounds.width < self.width() || bounds.height == 0 {
            return Ok(());
        }
        renderer.move_cursor(bounds.x, bounds.y)?;
        renderer.write_styled(&self.text(), &self.style(ctx))
    }

    fn min_size(&self) -> (u16, u16) {
        (self.width(), 1)
    }

    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Img
    }

    fn name(&self) -> &str {
        "Icon"
    }
}
