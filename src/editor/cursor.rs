//! Cursor position and movement.
//!
//! Movement is split in two steps. Each motion computes a candidate
//! `(column, line)` from the buffer without touching the cursor, and
//! [`Cursor::move_to`] commits whichever candidate the caller settles on.

use super::BufferId;
use super::buffer::Buffer;

/// A movement intent understood by [`Cursor::candidate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    DownLine,
    UpLine,
    BackCharacter,
    ForwardCharacter,
    BeginningOfLine,
    EndOfLine,
}

/// A `(column, line)` position within one buffer.
///
/// `line` is 1-based. `column` is 0-based and may run past the end of a
/// shorter line after vertical movement; it is kept as is so that returning
/// to a longer line restores the horizontal position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    column: usize,
    line: usize,
    buffer: BufferId,
}

impl Cursor {
    /// Create a cursor at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: BufferId) -> Self {
        Self {
            column: 0,
            line: 1,
            buffer,
        }
    }

    /// The buffer this cursor belongs to.
    #[must_use]
    pub const fn buffer(&self) -> BufferId {
        self.buffer
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Current `(column, line)`.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        (self.column, self.line)
    }

    /// Commit a position. Line 0 is stored as line 1.
    pub fn move_to(&mut self, (column, line): (usize, usize)) {
        self.column = column;
        self.line = line.max(1);
    }

    /// Candidate position for `motion`.
    #[must_use]
    pub fn candidate(&self, motion: Motion, buffer: &Buffer) -> (usize, usize) {
        match motion {
            Motion::DownLine => self.down_line(buffer),
            Motion::UpLine => self.up_line(),
            Motion::BackCharacter => self.back_character(),
            Motion::ForwardCharacter => self.forward_character(buffer),
            Motion::BeginningOfLine => self.beginning_of_line(),
            Motion::EndOfLine => self.end_of_line(buffer),
        }
    }

    /// Next line, or the current position when there is none.
    #[must_use]
    pub fn down_line(&self, buffer: &Buffer) -> (usize, usize) {
        if buffer.get_line(self.line + 1).is_ok() {
            (self.column, self.line + 1)
        } else {
            self.position()
        }
    }

    /// Previous line, stopping at line 1.
    #[must_use]
    pub const fn up_line(&self) -> (usize, usize) {
        if self.line <= 1 {
            (self.column, 1)
        } else {
            (self.column, self.line - 1)
        }
    }

    #[must_use]
    pub const fn back_character(&self) -> (usize, usize) {
        (self.column.saturating_sub(1), self.line)
    }

    /// One column right, unless that would pass the end of the line.
    #[must_use]
    pub fn forward_character(&self, buffer: &Buffer) -> (usize, usize) {
        let len = buffer.line_len(self.line).unwrap_or(0);
        if self.column + 1 > len {
            self.position()
        } else {
            (self.column + 1, self.line)
        }
    }

    #[must_use]
    pub const fn beginning_of_line(&self) -> (usize, usize) {
        (0, self.line)
    }

    /// Last character of the line (column 0 on an empty line).
    #[must_use]
    pub fn end_of_line(&self, buffer: &Buffer) -> (usize, usize) {
        let len = buffer.line_len(self.line).unwrap_or(0);
        (len.saturating_sub(1), self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> Buffer {
        Buffer::from_bytes("Hello, World!\nLine 2\nLine 3")
    }

    fn cursor() -> Cursor {
        Cursor::new(BufferId(0))
    }

    #[test]
    fn test_new_cursor_at_start() {
        let cursor = cursor();
        assert_eq!(cursor.position(), (0, 1));
        assert_eq!(cursor.buffer(), BufferId(0));
    }

    #[test]
    fn test_down_then_up() {
        let buffer = hello();
        let mut cursor = cursor();
        assert_eq!(cursor.down_line(&buffer), (0, 2));

        cursor.move_to(cursor.down_line(&buffer));
        assert_eq!(cursor.position(), (0, 2));
        assert_eq!(cursor.up_line(), (0, 1));
    }

    #[test]
    fn test_candidates_do_not_move() {
        let buffer = hello();
        let cursor = cursor();
        let _ = cursor.candidate(Motion::DownLine, &buffer);
        let _ = cursor.candidate(Motion::EndOfLine, &buffer);
        assert_eq!(cursor.position(), (0, 1));
    }

    #[test]
    fn test_up_line_at_top() {
        assert_eq!(cursor().up_line(), (0, 1));
    }

    #[test]
    fn test_down_line_at_bottom() {
        let buffer = hello();
        let mut cursor = cursor();
        cursor.move_to((2, 3));
        assert_eq!(cursor.down_line(&buffer), (2, 3));
    }

    #[test]
    fn test_forward_then_back() {
        let buffer = hello();
        let mut cursor = cursor();
        assert_eq!(cursor.forward_character(&buffer).0, 1);

        cursor.move_to(cursor.forward_character(&buffer));
        assert_eq!(cursor.back_character().0, 0);
    }

    #[test]
    fn test_back_character_at_first_column() {
        assert_eq!(cursor().back_character(), (0, 1));
    }

    #[test]
    fn test_forward_character_stops_at_line_end() {
        let buffer = Buffer::from_bytes("ab");
        let mut cursor = cursor();
        for _ in 0..5 {
            cursor.move_to(cursor.forward_character(&buffer));
        }
        let stuck = cursor.position();
        assert_eq!(cursor.forward_character(&buffer), stuck);
        assert_eq!(cursor.forward_character(&buffer), stuck);
    }

    #[test]
    fn test_end_and_beginning_of_line() {
        let buffer = hello();
        let mut cursor = cursor();
        cursor.move_to(cursor.end_of_line(&buffer));
        assert_eq!(cursor.position(), (12, 1));
        assert_eq!(cursor.beginning_of_line(), (0, 1));
    }

    #[test]
    fn test_end_of_empty_line() {
        let buffer = Buffer::from_bytes("x\n\ny");
        let mut cursor = cursor();
        cursor.move_to((0, 2));
        assert_eq!(cursor.end_of_line(&buffer), (0, 2));
    }

    #[test]
    fn test_column_sticks_past_short_line() {
        let buffer = Buffer::from_bytes("long line\nab\nlong line");
        let mut cursor = cursor();
        cursor.move_to(cursor.end_of_line(&buffer));
        cursor.move_to(cursor.down_line(&buffer));
        assert_eq!(cursor.position(), (8, 2));
        cursor.move_to(cursor.down_line(&buffer));
        assert_eq!(cursor.position(), (8, 3));
    }
}
