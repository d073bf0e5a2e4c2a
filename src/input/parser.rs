//! Byte-level parser for terminal key input.
//!
//! Parses raw bytes from the terminal into key events. Supports:
//! - Printable ASCII and UTF-8 characters
//! - Control characters as Ctrl+letter
//! - CSI sequences with xterm modifier parameters
//! - SS3 sequences used by keypad application mode

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]

use crate::input::event::Event;
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Error type for input parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence (need more bytes).
    Incomplete,
    /// Unrecognized escape sequence; the bytes are returned for skipping.
    UnrecognizedSequence(Vec<u8>),
    /// Invalid UTF-8 in input.
    InvalidUtf8,
}

/// Result of parsing input: the event and how many bytes it used.
pub type ParseResult = Result<(Event, usize), ParseError>;

/// Stateless parser from raw terminal bytes to [`Event`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputParser;

impl InputParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse one event from the front of `input`.
    ///
    /// Returns the event and number of bytes consumed. A lone `ESC` is
    /// [`ParseError::Incomplete`]; callers that see no further input should
    /// treat it as the Escape key with [`parse_pending_escape`](Self::parse_pending_escape).
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };

        let key = match first {
            0x1b => return self.parse_escape(input),
            0x00 => KeyEvent::key(KeyCode::Null),
            0x08 | 0x7f => KeyEvent::key(KeyCode::Backspace),
            b'\t' => KeyEvent::key(KeyCode::Tab),
            b'\r' | b'\n' => KeyEvent::key(KeyCode::Enter),
            0x01..=0x1a => KeyEvent::with_ctrl(KeyCode::Char(char::from(first - 1 + b'a'))),
            0x20..=0x7e => KeyEvent::char(char::from(first)),
            0x80..=0xff => return self.parse_utf8(input),
            _ => return Err(ParseError::UnrecognizedSequence(vec![first])),
        };
        Ok((key.into(), 1))
    }

    /// Resolve input that stopped at a lone `ESC`.
    #[must_use]
    pub fn parse_pending_escape(&self, input: &[u8]) -> Option<(Event, usize)> {
        (input == [0x1b]).then(|| (KeyEvent::key(KeyCode::Esc).into(), 1))
    }

    fn parse_escape(&self, input: &[u8]) -> ParseResult {
        let Some(&second) = input.get(1) else {
            return Err(ParseError::Incomplete);
        };

        match second {
            b'[' => self.parse_csi(input),
            b'O' => self.parse_ss3(input),
            0x20..=0x7e => Ok((
                KeyEvent::new(KeyCode::Char(char::from(second)), KeyModifiers::ALT).into(),
                2,
            )),
            _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        }
    }

    fn parse_csi(&self, input: &[u8]) -> ParseResult {
        // Final byte is in 0x40..=0x7e
        let Some(end) = input
            .iter()
            .skip(2)
            .position(|b| (0x40..=0x7e).contains(b))
            .map(|pos| pos + 2)
        else {
            return Err(ParseError::Incomplete);
        };

        let params = &input[2..end];
        let consumed = end + 1;
        let code = match input[end] {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'~' => return self.parse_tilde_key(params, consumed, &input[..consumed]),
            _ => return Err(ParseError::UnrecognizedSequence(input[..consumed].to_vec())),
        };

        let modifiers = parse_modifiers(params)?;
        Ok((KeyEvent::new(code, modifiers).into(), consumed))
    }

    fn parse_tilde_key(&self, params: &[u8], consumed: usize, sequence: &[u8]) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let num: u8 = s.split(';').next().and_then(|p| p.parse().ok()).unwrap_or(0);

        let code = match num {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            11..=15 => KeyCode::F(num - 10),
            17..=21 => KeyCode::F(num - 11),
            23 | 24 => KeyCode::F(num - 12),
            _ => return Err(ParseError::UnrecognizedSequence(sequence.to_vec())),
        };

        Ok((KeyEvent::new(code, parse_modifiers(params)?).into(), consumed))
    }

    fn parse_ss3(&self, input: &[u8]) -> ParseResult {
        let Some(&third) = input.get(2) else {
            return Err(ParseError::Incomplete);
        };

        let code = match third {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'M' => KeyCode::Enter,
            _ => return Err(ParseError::UnrecognizedSequence(input[..3].to_vec())),
        };

        Ok((KeyEvent::key(code).into(), 3))
    }

    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];
        let expected_len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8);
        };

        if input.len() < expected_len {
            return Err(ParseError::Incomplete);
        }

        let s = std::str::from_utf8(&input[..expected_len]).map_err(|_| ParseError::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;
        Ok((KeyEvent::char(c).into(), expected_len))
    }
}

/// Modifiers from the second CSI parameter: `1 + shift + 2*alt + 4*ctrl`.
fn parse_modifiers(params: &[u8]) -> Result<KeyModifiers, ParseError> {
    let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
    let Some(n) = s.split(';').nth(1).and_then(|p| p.parse::<u8>().ok()) else {
        return Ok(KeyModifiers::empty());
    };

    let n = n.saturating_sub(1);
    let mut mods = KeyModifiers::empty();
    if n & 1 != 0 {
        mods |= KeyModifiers::SHIFT;
    }
    if n & 2 != 0 {
        mods |= KeyModifiers::ALT;
    }
    if n & 4 != 0 {
        mods |= KeyModifiers::CTRL;
    }
    Ok(mods)
}
