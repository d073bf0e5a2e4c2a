//! Line and box drawing on a [`RuneGrid`].

use super::{Rect, RuneGrid};
use crate::error::{Error, Result};

/// Edge and corner glyphs for a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BoxGlyphs {
    /// Double-line glyphs, used for the outer editor border.
    pub const DOUBLE: Self = Self {
        horizontal: '═',
        vertical: '║',
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
    };

    /// Single-line glyphs.
    pub const SINGLE: Self = Self {
        horizontal: '─',
        vertical: '│',
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
    };

    /// Plain ASCII for terminals without box drawing characters.
    pub const ASCII: Self = Self {
        horizontal: '-',
        vertical: '|',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
    };

    /// Every edge and corner drawn with `glyph`.
    #[must_use]
    pub const fn uniform(glyph: char) -> Self {
        Self {
            horizontal: glyph,
            vertical: glyph,
            top_left: glyph,
            top_right: glyph,
            bottom_left: glyph,
            bottom_right: glyph,
        }
    }

    /// Build from a primary glyph plus 0, 1 or 5 extras.
    ///
    /// `glyph` is the horizontal edge and, unless overridden, everything
    /// else. `extra[0]` is the vertical edge; `extra[1..5]` are the corners
    /// top-left, top-right, bottom-left, bottom-right.
    pub fn from_glyphs(glyph: char, extra: &[char]) -> Result<Self> {
        let mut glyphs = Self::uniform(glyph);
        match *extra {
            [] => {}
            [vertical] => glyphs.vertical = vertical,
            [vertical, top_left, top_right, bottom_left, bottom_right] => {
                glyphs.vertical = vertical;
                glyphs.top_left = top_left;
                glyphs.top_right = top_right;
                glyphs.bottom_left = bottom_left;
                glyphs.bottom_right = bottom_right;
            }
            _ => return Err(Error::InvalidGlyphCount(extra.len())),
        }
        Ok(glyphs)
    }
}

impl RuneGrid {
    /// Draw `ch` on row `y` from `x1` to `x2` inclusive.
    pub fn draw_hline(&mut self, x1: i32, x2: i32, y: i32, ch: char) {
        for x in x1..=x2 {
            self.set_cell(x, y, ch);
        }
    }

    /// Draw `ch` on column `x` from `y1` to `y2` inclusive.
    pub fn draw_vline(&mut self, x: i32, y1: i32, y2: i32, ch: char) {
        for y in y1..=y2 {
            self.set_cell(x, y, ch);
        }
    }

    /// Draw a box with corners at `(x1, y1)` and `(x2, y2)`.
    ///
    /// See [`BoxGlyphs::from_glyphs`] for how `glyph` and `extra` are used.
    /// Nothing is drawn if `extra` has an unsupported length.
    pub fn draw_box(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        glyph: char,
        extra: &[char],
    ) -> Result<()> {
        let glyphs = BoxGlyphs::from_glyphs(glyph, extra)?;
        self.draw_box_with(Rect::new(x1, y1, x2, y2), &glyphs);
        Ok(())
    }

    /// Draw the outline of `rect`: edges first, then the four corners.
    pub fn draw_box_with(&mut self, rect: Rect, glyphs: &BoxGlyphs) {
        let Rect { x1, y1, x2, y2 } = rect;

        self.draw_hline(x1 + 1, x2 - 1, y1, glyphs.horizontal);
        self.draw_hline(x1 + 1, x2 - 1, y2, glyphs.horizontal);
        self.draw_vline(x1, y1 + 1, y2 - 1, glyphs.vertical);
        self.draw_vline(x2, y1 + 1, y2 - 1, glyphs.vertical);

        self.set_cell(x1, y1, glyphs.top_left);
        self.set_cell(x2, y1, glyphs.top_right);
        self.set_cell(x1, y2, glyphs.bottom_left);
        self.set_cell(x2, y2, glyphs.bottom_right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_box() {
        let mut grid = RuneGrid::new(3, 3);
        grid.draw_box(0, 0, 2, 2, '#', &[]).unwrap();
        assert_eq!(grid, RuneGrid::from_rows(&["###", "#.#", "###"], '.'));
    }

    #[test]
    fn test_box_with_vertical_glyph() {
        let mut grid = RuneGrid::new(4, 3);
        grid.draw_box(0, 0, 3, 2, '-', &['|']).unwrap();
        assert_eq!(grid.to_lines('.'), ["----", "|..|", "----"]);
    }

    #[test]
    fn test_double_box() {
        let mut grid = RuneGrid::new(3, 3);
        grid.draw_box(0, 0, 2, 2, '═', &['║', '╔', '╗', '╚', '╝'])
            .unwrap();
        assert_eq!(grid.to_lines(' '), ["╔═╗", "║ ║", "╚═╝"]);

        let mut preset = RuneGrid::new(3, 3);
        preset.draw_box_with(Rect::new(0, 0, 2, 2), &BoxGlyphs::DOUBLE);
        assert_eq!(grid, preset);
    }

    #[test]
    fn test_single_box() {
        let mut grid = RuneGrid::new(4, 3);
        grid.draw_box_with(Rect::new(0, 0, 3, 2), &BoxGlyphs::SINGLE);
        assert_eq!(grid.to_lines(' '), ["┌──┐", "│  │", "└──┘"]);
    }

    #[test]
    fn test_invalid_glyph_count() {
        let mut grid = RuneGrid::new(3, 3);
        let cases: [&[char]; 3] = [&['a', 'b'], &['a', 'b', 'c'], &['a'; 6]];
        for extra in cases {
            let err = grid.draw_box(0, 0, 2, 2, '#', extra).unwrap_err();
            assert!(matches!(err, Error::InvalidGlyphCount(n) if n == extra.len()));
        }
        assert_eq!(grid, RuneGrid::new(3, 3));
    }

    #[test]
    fn test_box_partly_outside_is_clipped() {
        let mut grid = RuneGrid::new(3, 3);
        grid.draw_box_with(Rect::new(1, 1, 5, 5), &BoxGlyphs::ASCII);
        assert_eq!(grid.to_lines('.'), ["...", ".+-", ".|."]);
    }

    #[test]
    fn test_lines() {
        let mut grid = RuneGrid::new(3, 3);
        grid.draw_hline(0, 2, 1, '-');
        grid.draw_vline(1, 0, 2, '|');
        assert_eq!(grid.to_lines('.'), [".|.", "-|-", ".|."]);
    }
}
