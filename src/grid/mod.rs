//! Fixed-size character surface used as the render target.
//!
//! A [`RuneGrid`] is a `width x height` matrix of `char`. A cell holding
//! `'\0'` has not been painted. Every write is clipped: coordinates outside
//! the grid are dropped silently, so render code keeps working when the
//! terminal shrinks between measuring and drawing.
//!
//! # Examples
//!
//! ```
//! use jkl::grid::RuneGrid;
//!
//! let mut grid = RuneGrid::new(3, 3);
//! grid.set_cell(1, 1, 'C');
//! grid.set_cell(100, 100, '!');
//! grid.set_cell(-1, 0, '!');
//!
//! assert_eq!(grid.get(1, 1), Some('C'));
//! assert_eq!(grid, RuneGrid::from_rows(&["...", ".C.", "..."], '.'));
//! ```

mod drawing;

pub use drawing::BoxGlyphs;

/// Inclusive rectangle `[x1, x2] x [y1, y2]` in grid coordinates.
///
/// A rect may extend past the grid or be inverted (`x2 < x1`); writes to it
/// are clipped either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rect covering a whole `width x height` surface.
    #[must_use]
    pub fn of_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, to_coord(width) - 1, to_coord(height) - 1)
    }

    /// Shrink by `n` cells on every side.
    #[must_use]
    pub const fn inset(&self, n: i32) -> Self {
        Self::new(self.x1 + n, self.y1 + n, self.x2 - n, self.y2 - n)
    }

    /// Whether `(x, y)` is inside, edges included.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Row span `y2 - y1`, one less than the number of rows covered.
    #[must_use]
    pub const fn span(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// 2-D character matrix with clipped writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuneGrid {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl RuneGrid {
    /// Create a grid of unpainted (`'\0'`) cells. Zero sizes are allowed.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec!['\0'; size],
        }
    }

    /// Build a grid from text rows, mapping `blank` to `'\0'`.
    ///
    /// The width is taken from the first row. Shorter rows are padded with
    /// `'\0'`, longer rows are cut.
    #[must_use]
    pub fn from_rows(rows: &[&str], blank: char) -> Self {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let width = u32::try_from(width).unwrap_or(u32::MAX);
        let height = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let ch = if ch == blank { '\0' } else { ch };
                grid.set_cell(to_coord_usize(x), to_coord_usize(y), ch);
            }
        }
        grid
    }

    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    #[must_use]
    pub fn is_cell_valid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Paint one cell. Out-of-bounds coordinates are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = ch;
        }
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Reset every cell to `'\0'`.
    pub fn clear(&mut self) {
        self.cells.fill('\0');
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks() rejects a zero size; a zero-width grid simply has no rows
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Every cell as `(x, y, ch)`, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, char)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, &ch)| {
            let i = u32::try_from(i).unwrap_or(u32::MAX);
            (i % width, i / width, ch)
        })
    }

    /// Rows as strings with unpainted cells shown as `blank`.
    #[must_use]
    pub fn to_lines(&self, blank: char) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|&ch| if ch == '\0' { blank } else { ch })
                    .collect()
            })
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

fn to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn to_coord_usize(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_unpainted() {
        let grid = RuneGrid::new(3, 3);
        assert_eq!(grid.size(), (3, 3));
        assert!(grid.iter_cells().all(|(_, _, ch)| ch == '\0'));
        assert_eq!(grid, RuneGrid::from_rows(&["...", "...", "..."], '.'));
    }

    #[test]
    fn test_set_cell_compass() {
        let mut grid = RuneGrid::new(3, 3);
        grid.set_cell(1, 0, 'N');
        grid.set_cell(1, 2, 'S');
        grid.set_cell(2, 1, 'E');
        grid.set_cell(0, 1, 'W');
        grid.set_cell(1, 1, 'C');
        grid.set_cell(100, 100, '!');

        assert_eq!(grid, RuneGrid::from_rows(&[".N.", "WCE", ".S."], '.'));
    }

    #[test]
    fn test_set_cell_out_of_bounds_is_noop() {
        let mut grid = RuneGrid::new(2, 2);
        grid.set_cell(0, 0, 'a');
        let before = grid.clone();

        grid.set_cell(2, 0, '!');
        grid.set_cell(0, 2, '!');
        grid.set_cell(-1, 0, '!');
        grid.set_cell(0, -1, '!');
        grid.set_cell(i32::MAX, i32::MIN, '!');

        assert_eq!(grid, before);
    }

    #[test]
    fn test_zero_sized_grid() {
        let mut grid = RuneGrid::new(0, 0);
        grid.set_cell(0, 0, 'x');
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.rows().count(), 0);
        assert!(!grid.is_cell_valid(0, 0));
    }

    #[test]
    fn test_rows_and_iter_cells() {
        let grid = RuneGrid::from_rows(&["ab", "cd", "ef"], '.');
        let rows: Vec<String> = grid.rows().map(|row| row.iter().collect()).collect();
        assert_eq!(rows, ["ab", "cd", "ef"]);

        let cells: Vec<_> = grid.iter_cells().collect();
        assert_eq!(cells[3], (1, 1, 'd'));
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_from_rows_maps_blank_and_pads() {
        let grid = RuneGrid::from_rows(&["a.c", "d"], '.');
        assert_eq!(grid.size(), (3, 2));
        assert_eq!(grid.get(1, 0), Some('\0'));
        assert_eq!(grid.get(2, 1), Some('\0'));
        assert_eq!(grid.to_lines('.'), ["a.c", "d.."]);
    }

    #[test]
    fn test_clear() {
        let mut grid = RuneGrid::from_rows(&["xy"], '.');
        grid.clear();
        assert_eq!(grid, RuneGrid::new(2, 1));
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::of_size(80, 24);
        assert_eq!(rect, Rect::new(0, 0, 79, 23));
        assert_eq!(rect.inset(1), Rect::new(1, 1, 78, 22));
        assert_eq!(rect.span(), 23);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(79, 23));
        assert!(!rect.contains(80, 0));
        assert!(!rect.contains(-1, 5));
    }
}
