//! Buffered ANSI output writer with state tracking.

use crate::ansi::{self, sequences};
use crate::color::Color;
use std::io::{self, Write};

/// Buffered writer that tracks colour and cursor state so repeated cells
/// in the same colours and adjacent positions cost no escape sequences.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,

    current_colors: Option<(Color, Color)>,
    cursor: Option<(u32, u32)>,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a new ANSI writer wrapping the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            current_colors: None,
            cursor: None,
        }
    }

    /// Forget tracked state so the next cell re-emits position and colours.
    pub fn reset_state(&mut self) {
        self.current_colors = None;
        self.cursor = None;
    }

    /// Write a raw string to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
        self.cursor = None;
    }

    /// Move the cursor to `(row, col)`, skipping the sequence if already there.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        if self.cursor == Some((row, col)) {
            return;
        }
        let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
        self.cursor = Some((row, col));
    }

    /// Select colours, skipping the sequence if they are already active.
    pub fn set_colors(&mut self, fg: Color, bg: Color) {
        if self.current_colors == Some((fg, bg)) {
            return;
        }
        let _ = ansi::write_colors(&mut self.buffer, fg, bg);
        self.current_colors = Some((fg, bg));
    }

    /// Write one cell at the current position and advance one column.
    pub fn write_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.buffer
            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
        if let Some((row, col)) = self.cursor {
            self.cursor = Some((row, col.saturating_add(1)));
        }
    }

    /// Write `ch` at `(row, col)` in the given colours.
    pub fn write_cell(&mut self, row: u32, col: u32, ch: char, fg: Color, bg: Color) {
        self.move_cursor(row, col);
        self.set_colors(fg, bg);
        self.write_char(ch);
    }

    /// Reset attributes to the terminal defaults.
    pub fn reset_colors(&mut self) {
        self.buffer.extend_from_slice(sequences::RESET.as_bytes());
        self.current_colors = None;
    }

    /// Bytes buffered and not yet flushed.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Write the buffer to the underlying writer and flush it.
    pub fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            self.writer.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        self.writer.flush()
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrow the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}
