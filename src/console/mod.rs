//! Console surfaces the UI draws on.
//!
//! A [`Console`] is a grid of coloured cells plus a hardware cursor and a
//! source of input events. Drawing follows the termbox model: [`clear`],
//! any number of [`set_cell`] calls, optionally [`set_cursor`], then
//! [`after_draw`] to present the frame.
//!
//! [`TerminalConsole`] drives a real terminal; [`FakeConsole`] records
//! everything in memory for tests.
//!
//! [`clear`]: Console::clear
//! [`set_cell`]: Console::set_cell
//! [`set_cursor`]: Console::set_cursor
//! [`after_draw`]: Console::after_draw

mod fake;
mod terminal;

pub use fake::FakeConsole;
pub use terminal::TerminalConsole;

use crate::color::Color;
use crate::error::Result;
use crate::input::Event;
use std::sync::mpsc::Sender;

/// Output surface and input source for the UI.
pub trait Console: Send {
    /// Current size as `(width, height)` in cells.
    fn size(&self) -> (u32, u32);

    /// Take over the device and start delivering input to `events`.
    fn init(&mut self, events: Sender<Event>) -> Result<()>;

    /// Stop delivering input and give the device back.
    fn close(&mut self) -> Result<()>;

    /// Reset the pending frame to blank cells at the current size.
    fn clear(&mut self, fg: Color, bg: Color);

    /// Set one cell of the pending frame. Out-of-bounds cells are ignored.
    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color);

    /// Place the hardware cursor, or hide it with `None`.
    fn set_cursor(&mut self, position: Option<(i32, i32)>);

    /// Present the pending frame.
    fn after_draw(&mut self) -> Result<()>;
}

/// One cell of a console frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsoleCell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl ConsoleCell {
    #[must_use]
    pub const fn blank(fg: Color, bg: Color) -> Self {
        Self { ch: ' ', fg, bg }
    }
}

impl Default for ConsoleCell {
    fn default() -> Self {
        Self::blank(Color::Default, Color::Default)
    }
}
