//! Displayable content: the values placed in labels, messages and icon slots

use crate::components::icon::Icon;
use crate::context::RenderContext;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::style::Selector;
use anyhow::Result;

/// Horizontal placement of content within its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalAlign {
    Left,
    Center,
    Right,
}

/// Content that can be shown in a message, label or icon slot
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Plain text, may span several lines
    Text(String),
    /// Text with a style class for stylesheet lookups
    Styled { text: String, class: String },
    /// A single icon
    Icon(Icon),
}

impl Content {
    pub fn text(s: impl Into<String>) -> Self {
        Content::Text(s.into())
    }

    pub fn styled(text: impl Into<String>, class: impl Into<String>) -> Self {
        Content::Styled {
            text: text.into(),
            class: class.into(),
        }
    }

    /// Plain-text rendition (icons become their glyph)
    pub fn as_text(&self) -> String {
        match self {
            Content::Text(s) => s.clone(),
            Content::Styled { text, .. } => text.clone(),
            Content::Icon(icon) => icon.glyph().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(s) => s.is_empty(),
            Content::Styled { text, .. } => text.is_empty(),
            Content::Icon(_) => false,
        }
    }

    /// Lines after wrapping to `width` columns
    pub fn lines(&self, width: u16) -> Vec<String> {
        match self {
            Content::Icon(icon) => vec![icon.text()],
            _ => wrap_text(&self.as_text(), width as usize),
        }
    }

    /// Natural (unwrapped) size in cells
    pub fn natural_size(&self) -> (u16, u16) {
        match self {
            Content::Icon(icon) => (icon.width(), 1),
            _ => {
                let text = self.as_text();
                let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                let height = text.lines().count().max(1);
                (width as u16, height as u16)
            }
        }
    }

    /// Size after wrapping to at most `max_width` columns
    pub fn measure(&self, max_width: u16) -> (u16, u16) {
        let lines = self.lines(max_width);
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        (width as u16, lines.len() as u16)
    }

    /// ANSI style for this content on top of a base style
    fn style(&self, base: &str, ctx: &RenderContext) -> String {
        match self {
            Content::Icon(icon) => icon.style(ctx),
            Content::Styled { class, .. } => {
                let extra = ctx
                    .computed_style(&[Selector::class(class.as_str())])
                    .to_ansi(ctx.theme.capabilities());
                format!("{}{}", base, extra)
            }
            Content::Text(_) => base.to_string(),
        }
    }

    /// Draw wrapped into `bounds`, clipping lines that don't fit
    pub fn render(
        &self,
        renderer: &mut Renderer,
        bounds: Rect,
        ctx: &RenderContext,
        base_style: &str,
        align: PhysicalAlign,
    ) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }

        let style = self.style(base_style, ctx);
        for (i, line) in self
            .lines(bounds.width)
            .iter()
            .enumerate()
            .take(bounds.height as usize)
        {
            let shown: String = line.chars().take(bounds.width as usize).collect();
            let free = bounds.width.saturating_sub(shown.chars().count() as u16);
            let offset = match align {
                PhysicalAlign::Left => 0,
                PhysicalAlign::Center => free / 2,
                PhysicalAlign::Right => free,
            };
            renderer.move_cursor(bounds.x + offset, bounds.y + i as u16)?;
            if style.is_empty() {
                renderer.write_text(&shown)?;
            } else {
                renderer.write_styled(&shown, &style)?;
            }
        }
        Ok(())
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<Icon> for Content {
    fn from(icon: Icon) -> Self {
        Content::Icon(icon)
    }
}

/// Greedy word wrap; words longer than `width` are hard-split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > width && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        lines.push(current);
    }

    lines
}
