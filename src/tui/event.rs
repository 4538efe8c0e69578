//! Event handling for the TUI
//!
//! Reads terminal events with crossterm's blocking `read`; each event is
//! handled to completion before the next one is read.

use std::io;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Terminal events the UI reacts to
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Block until the next relevant event
pub fn next() -> io::Result<Event> {
    loop {
        match event::read()? {
            CrosstermEvent::Key(key) => return Ok(Event::Key(key)),
            CrosstermEvent::Resize(width, height) => return Ok(Event::Resize(width, height)),
            _ => {}
        }
    }
}
