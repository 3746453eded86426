//! Rendering backend - terminal output and cursor management
//!
//! Output is buffered to minimize syscalls. A headless renderer draws into an
//! in-memory cell grid instead, so components can be rendered without a tty.

use crate::terminal::TerminalContext;
use anyhow::Result;
use std::cell::RefCell;
use std::io::{self, BufWriter, Write};
use std::rc::Rc;

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

/// In-memory screen used by headless renderers
#[derive(Debug, Clone)]
pub struct Screen {
    cells: Vec<Vec<char>>,
    cursor: (u16, u16),
}

impl Screen {
    fn new(cols: u16, rows: u16) -> Self {
        Screen {
            cells: vec![vec![' '; cols as usize]; rows as usize],
            cursor: (0, 0),
        }
    }

    fn clear(&mut self) {
        for row in &mut self.cells {
            row.iter_mut().for_each(|c| *c = ' ');
        }
    }

    fn put_str(&mut self, text: &str) {
        for ch in text.chars() {
            let (col, row) = self.cursor;
            if let Some(cell) = self
                .cells
                .get_mut(row as usize)
                .and_then(|r| r.get_mut(col as usize))
            {
                *cell = ch;
            }
            self.cursor.0 = col.saturating_add(1);
        }
    }

    /// A single row with trailing whitespace removed
    pub fn line(&self, row: u16) -> String {
        self.cells
            .get(row as usize)
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// The whole screen, one line per row
    pub fn text(&self) -> String {
        (0..self.cells.len() as u16)
            .map(|row| self.line(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Find the first (col, row) where `needle` starts
    pub fn find(&self, needle: &str) -> Option<(u16, u16)> {
        (0..self.cells.len() as u16).find_map(|row| {
            let line: String = self.cells[row as usize].iter().collect();
            line.find(needle)
                .map(|byte_idx| (line[..byte_idx].chars().count() as u16, row))
        })
    }

    /// Whether the screen contains `needle` on any single row
    pub fn contains(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }
}

enum Output {
    Terminal(BufWriter<io::Stdout>),
    Headless(Rc<RefCell<Screen>>),
}

/// Terminal renderer handling buffered output and cursor management
///
/// Call `flush()` (or `end_frame()`) after a batch of operations to ensure
/// output is displayed.
pub struct Renderer {
    output: Output,
    context: TerminalContext,
    in_alt_screen: bool,
}

impl Renderer {
    /// Create a new renderer writing to stdout with detected terminal context
    pub fn new() -> Result<Self> {
        let context = TerminalContext::detect()?;
        let writer = BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, io::stdout());

        tracing::debug!(
            cols = context.geometry.cols,
            rows = context.geometry.rows,
            truecolor = context.capabilities.truecolor,
            "terminal renderer created"
        );

        Ok(Renderer {
            output: Output::Terminal(writer),
            context,
            in_alt_screen: false,
        })
    }

    /// Create a renderer drawing into an 80x24 in-memory screen
    pub fn headless() -> Self {
        Self::headless_sized(80, 24)
    }

    /// Create a renderer drawing into an in-memory screen of the given size
    pub fn headless_sized(cols: u16, rows: u16) -> Self {
        Renderer {
            output: Output::Headless(Rc::new(RefCell::new(Screen::new(cols, rows)))),
            context: TerminalContext::headless(cols, rows),
            in_alt_screen: false,
        }
    }

    /// Snapshot of the in-memory screen (None for terminal renderers)
    pub fn screen(&self) -> Option<Screen> {
        match &self.output {
            Output::Headless(screen) => Some(screen.borrow().clone()),
            Output::Terminal(_) => None,
        }
    }

    fn emit(&mut self, sequence: &str) -> Result<()> {
        if let Output::Terminal(writer) = &mut self.output {
            writer.write_all(sequence.as_bytes())?;
        }
        Ok(())
    }

    /// Enter alternative screen buffer
    ///
    /// Note: This immediately flushes to ensure the screen switch happens.
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            self.emit("\x1b[?1049h")?;
            self.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit alternative screen buffer
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            self.emit("\x1b[?1049l")?;
            self.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        match &mut self.output {
            Output::Terminal(writer) => write!(writer, "\x1b[2J")?,
            Output::Headless(screen) => screen.borrow_mut().clear(),
        }
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        match &mut self.output {
            Output::Terminal(writer) => write!(writer, "\x1b[{};{}H", row + 1, col + 1)?,
            Output::Headless(screen) => screen.borrow_mut().cursor = (col, row),
        }
        Ok(())
    }

    /// Hide cursor (buffered)
    pub fn hide_cursor(&mut self) -> Result<()> {
        self.emit("\x1b[?25l")
    }

    /// Show cursor (buffered)
    pub fn show_cursor(&mut self) -> Result<()> {
        self.emit("\x1b[?25h")
    }

    /// Write text at current cursor position
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        match &mut self.output {
            Output::Terminal(writer) => writer.write_all(text.as_bytes())?,
            Output::Headless(screen) => screen.borrow_mut().put_str(text),
        }
        Ok(())
    }

    /// Write text with ANSI color/style codes, resetting afterwards
    #[inline]
    pub fn write_styled(&mut self, text: &str, style: &str) -> Result<()> {
        match &mut self.output {
            Output::Terminal(writer) => write!(writer, "{}{}\x1b[0m", style, text)?,
            Output::Headless(screen) => screen.borrow_mut().put_str(text),
        }
        Ok(())
    }

    /// Write a repeated character
    #[inline]
    pub fn write_repeated(&mut self, ch: char, count: usize) -> Result<()> {
        let run: String = std::iter::repeat(ch).take(count).collect();
        self.write_text(&run)
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        if let Output::Terminal(writer) = &mut self.output {
            writer.flush()?;
        }
        Ok(())
    }

    /// Get current terminal context
    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    /// Refresh terminal geometry (call after resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        if let Output::Terminal(_) = self.output {
            self.context.refresh_geometry()?;
        }
        Ok(())
    }

    /// Begin a render frame - hides cursor
    pub fn begin_frame(&mut self) -> Result<()> {
        self.hide_cursor()
    }

    /// End a render frame - shows cursor and flushes output
    pub fn end_frame(&mut self) -> Result<()> {
        self.show_cursor()?;
        self.flush()
    }

    /// Check if the renderer is in alternative screen mode
    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Restore terminal state even during panics
        let _ = self.exit_alt_screen();
        let _ = self.show_cursor();
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_writes_land_on_screen() {
        let mut renderer = Renderer::headless_sized(20, 3);
        renderer.move_cursor(2, 1).unwrap();
        renderer.write_text("hello").unwrap();
        renderer.write_styled("!", "\x1b[1m").unwrap();

        let screen = renderer.screen().unwrap();
        assert_eq!(screen.line(1), "  hello!");
        assert_eq!(screen.find("hello"), Some((2, 1)));
    }

    #[test]
    fn test_headless_clips_out_of_bounds() {
        let mut renderer = Renderer::headless_sized(4, 1);
        renderer.move_cursor(2, 0).unwrap();
        renderer.write_text("abcdef").unwrap();
        renderer.move_cursor(0, 5).unwrap();
        renderer.write_text("ignored").unwrap();

        let screen = renderer.screen().unwrap();
        assert_eq!(screen.text(), "  ab");
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut renderer = Renderer::headless_sized(10, 2);
        renderer.write_repeated('x', 5).unwrap();
        renderer.clear().unwrap();
        assert!(!renderer.screen().unwrap().contains("x"));
    }
}
