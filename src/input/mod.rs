//! Terminal input parsing.
//!
//! Turns the raw bytes read from a terminal in raw mode into key events.
//! Legacy VT sequences and xterm-style CSI modifiers are understood; mouse
//! reporting and bracketed paste are never enabled, so they are not parsed.

mod event;
mod keyboard;
mod parser;

pub use event::{Event, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult};
