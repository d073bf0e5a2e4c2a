//! Terminal device control.

mod raw;

pub use raw::{READ_TIMEOUT_DECISECONDS, RawModeGuard, enable_raw_mode, is_tty, terminal_size};

use crate::ansi::sequences;
use std::io::{self, Write};

/// Terminal state manager.
///
/// Tracks which modes are active so that [`cleanup`](Self::cleanup), which
/// also runs on drop, only undoes what was actually done.
pub struct Terminal<W: Write> {
    writer: W,
    alt_screen: bool,
    cursor_visible: bool,
    raw_mode_guard: Option<RawModeGuard>,
}

impl<W: Write> Terminal<W> {
    /// Create a new terminal with the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            alt_screen: false,
            cursor_visible: true,
            raw_mode_guard: None,
        }
    }

    /// Check if terminal is in raw mode.
    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    /// Put stdin in raw mode.
    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode()?);
        }
        Ok(())
    }

    /// Restore stdin to the mode it had before [`enter_raw_mode`](Self::enter_raw_mode).
    pub fn exit_raw_mode(&mut self) {
        self.raw_mode_guard = None;
    }

    #[must_use]
    pub fn is_alt_screen(&self) -> bool {
        self.alt_screen
    }

    /// Enter alternate screen buffer.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        if !self.alt_screen {
            self.writer.write_all(sequences::ALT_SCREEN_ON.as_bytes())?;
            self.alt_screen = true;
        }
        Ok(())
    }

    /// Leave alternate screen buffer.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        if self.alt_screen {
            self.writer
                .write_all(sequences::ALT_SCREEN_OFF.as_bytes())?;
            self.alt_screen = false;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Hide cursor.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        if self.cursor_visible {
            self.writer.write_all(sequences::CURSOR_HIDE.as_bytes())?;
            self.cursor_visible = false;
        }
        Ok(())
    }

    /// Show cursor.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        if !self.cursor_visible {
            self.writer.write_all(sequences::CURSOR_SHOW.as_bytes())?;
            self.cursor_visible = true;
        }
        Ok(())
    }

    /// Move cursor to a 0-based position.
    pub fn move_cursor(&mut self, x: u32, y: u32) -> io::Result<()> {
        crate::ansi::write_cursor_position(&mut self.writer, y, x)
    }

    /// Clear the screen and home the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::CLEAR_SCREEN.as_bytes())?;
        self.writer.write_all(sequences::CURSOR_HOME.as_bytes())
    }

    /// Write pre-encoded output.
    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    /// Flush the output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Borrow the underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Undo every mode change and restore default attributes.
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.show_cursor()?;
        self.leave_alt_screen()?;
        self.exit_raw_mode();
        self.writer.write_all(sequences::RESET.as_bytes())?;
        self.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
