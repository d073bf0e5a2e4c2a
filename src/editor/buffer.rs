//! Rope-backed text buffer with 1-based line addressing.
//!
//! Lines are split on `\n` only. Content that ends in a single newline has no
//! empty line after the terminator, while content ending in `\n\n` has one
//! empty line between the two terminators:
//!
//! ```
//! use jkl::editor::Buffer;
//!
//! let buffer = Buffer::from_bytes("Test\n");
//! assert_eq!(buffer.get_line(1).unwrap(), "Test");
//! assert!(buffer.get_line(2).is_err());
//!
//! let buffer = Buffer::from_bytes("Test\n\n");
//! assert_eq!(buffer.get_line(2).unwrap(), "");
//! ```

use crate::error::{Error, Result};
use ropey::{Rope, RopeSlice};
use std::io::{self, Read};

/// Text content of one file.
///
/// The raw bytes are kept as stored; line access goes through a rope built
/// from their UTF-8 decoding.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    filename: String,
    data: Vec<u8>,
    rope: Rope,
}

impl Buffer {
    /// Create an empty buffer with no filename.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unnamed buffer holding `data`.
    #[must_use]
    pub fn from_bytes(data: impl AsRef<[u8]>) -> Self {
        let mut buffer = Self::new();
        buffer.set_data(data.as_ref());
        buffer
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Set the name the buffer will be saved under.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    /// Replace the whole content.
    ///
    /// [`data`](Self::data) returns these bytes unchanged. For line access,
    /// bytes that are not valid UTF-8 read as U+FFFD.
    pub fn set_data(&mut self, data: &[u8]) {
        self.rope = Rope::from_str(&String::from_utf8_lossy(data));
        self.data = data.to_vec();
    }

    /// Replace the whole content with a string.
    pub fn set_data_string(&mut self, data: &str) {
        self.rope = Rope::from_str(data);
        self.data = data.as_bytes().to_vec();
    }

    /// Replace the whole content with everything `reader` yields.
    pub fn read_data<R: Read>(&mut self, mut reader: R) -> io::Result<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.rope = Rope::from_str(&String::from_utf8_lossy(&data));
        self.data = data;
        Ok(())
    }

    /// The whole content, byte for byte as it was set.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the buffer holds no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of addressable lines.
    ///
    /// A final `\n` terminates the last line rather than starting a new one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let chars = self.rope.len_chars();
        if chars == 0 {
            return 0;
        }
        let lines = self.rope.len_lines();
        if self.rope.char(chars - 1) == '\n' {
            lines - 1
        } else {
            lines
        }
    }

    /// Return line `line` (1-based) without its terminator.
    pub fn get_line(&self, line: usize) -> Result<String> {
        self.line_slice(line)
            .map(|slice| slice.to_string())
            .ok_or(Error::LineNotFound { line })
    }

    /// Return the inclusive range `first..=last`.
    ///
    /// Lines past the end are silently left out, and a `first` of 0 is read
    /// as 1. Fails only when `first > last`.
    pub fn get_lines(&self, first: usize, last: usize) -> Result<Vec<String>> {
        if first > last {
            return Err(Error::InvalidRange { first, last });
        }

        let first = first.max(1);
        let last = last.min(self.line_count());
        Ok((first..=last)
            .filter_map(|line| self.line_slice(line))
            .map(|slice| slice.to_string())
            .collect())
    }

    /// Length of line `line` in characters.
    #[must_use]
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.line_slice(line).map(|slice| slice.len_chars())
    }

    fn line_slice(&self, line: usize) -> Option<RopeSlice<'_>> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let slice = self.rope.line(line - 1);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            Some(slice.slice(..len - 1))
        } else {
            Some(slice)
        }
    }
}
