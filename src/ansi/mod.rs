//! ANSI escape sequence generation.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::color::Color;
use std::io::{self, Write};

/// Write a u32 as decimal digits without going through `fmt`.
#[inline]
fn write_u32_decimal(w: &mut impl Write, mut n: u32) -> io::Result<()> {
    let mut digits = [0u8; 10];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    w.write_all(&digits[start..])
}

/// Write a cursor position sequence. `row` and `col` are 0-based.
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row.saturating_add(1))?;
    w.write_all(b";")?;
    write_u32_decimal(w, col.saturating_add(1))?;
    w.write_all(b"H")
}

/// Write one SGR sequence selecting both colours.
pub fn write_colors(w: &mut impl Write, fg: Color, bg: Color) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, u32::from(fg.fg_code()))?;
    w.write_all(b";")?;
    write_u32_decimal(w, u32::from(bg.bg_code()))?;
    w.write_all(b"m")
}

/// Cursor position sequence as a string. `row` and `col` are 0-based.
#[must_use]
pub fn cursor_position(row: u32, col: u32) -> String {
    format!("\x1b[{};{}H", row.saturating_add(1), col.saturating_add(1))
}
