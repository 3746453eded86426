//! Event system - keyboard, mouse, and terminal events

use anyhow::Result;
use crossterm::event::{self as ct, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use std::time::Duration;

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Ctrl(char),
    Alt(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    BackTab,
    Backspace,
    Delete,
    Enter,
    Tab,
    Esc,
    Null,
}

impl Key {
    fn from_crossterm(code: KeyCode, mods: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(c) if mods.contains(KeyModifiers::CONTROL) => Key::Ctrl(c),
            KeyCode::Char(c) if mods.contains(KeyModifiers::ALT) => Key::Alt(c),
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::F(n) => Key::F(n),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Tab if mods.contains(KeyModifiers::SHIFT) => Key::BackTab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Esc,
            _ => Key::Null,
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16), // button, col, row
    Release(u16, u16),            // col, row
    Hold(u16, u16),               // col, row (drag)
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Paste(String),
}

impl From<ct::Event> for Event {
    fn from(event: ct::Event) -> Self {
        match event {
            // Windows reports releases too; only presses activate anything
            ct::Event::Key(key) if key.kind == KeyEventKind::Release => Event::Key(Key::Null),
            ct::Event::Key(key) => Event::Key(Key::from_crossterm(key.code, key.modifiers)),
            ct::Event::Mouse(me) => {
                let (col, row) = (me.column, me.row);
                let mouse = match me.kind {
                    MouseEventKind::Down(btn) => {
                        let button = match btn {
                            ct::MouseButton::Left => MouseButton::Left,
                            ct::MouseButton::Right => MouseButton::Right,
                            ct::MouseButton::Middle => MouseButton::Middle,
                        };
                        MouseEvent::Press(button, col, row)
                    }
                    MouseEventKind::Drag(_) | MouseEventKind::Moved => MouseEvent::Hold(col, row),
                    MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                    MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                    _ => MouseEvent::Release(col, row),
                };
                Event::Mouse(mouse)
            }
            ct::Event::Resize(cols, rows) => Event::Resize(cols, rows),
            ct::Event::FocusGained => Event::FocusGained,
            ct::Event::FocusLost => Event::FocusLost,
            ct::Event::Paste(data) => Event::Paste(data),
        }
    }
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when component gains focus
    fn on_focus(&mut self) {}

    /// Called when component loses focus
    fn on_blur(&mut self) {}
}

/// Raw-mode terminal event source; restores the terminal on drop
pub struct EventPoller {
    _enabled: bool,
}

impl EventPoller {
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        // Mouse and focus reporting are optional
        let _ = crossterm::execute!(
            std::io::stdout(),
            ct::EnableMouseCapture,
            ct::EnableFocusChange,
        );

        Ok(EventPoller { _enabled: true })
    }

    /// Poll for the next event, returning None on timeout
    pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
        if ct::poll(timeout)? {
            Ok(Some(ct::read()?.into()))
        } else {
            Ok(None)
        }
    }

    /// Block until the next event
    pub fn read(&self) -> Result<Event> {
        Ok(ct::read()?.into())
    }
}

impl Drop for EventPoller {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            std::io::stdout(),
            ct::DisableMouseCapture,
            ct::DisableFocusChange,
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}
