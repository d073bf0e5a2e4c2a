//! Projection of editor state onto a [`RuneGrid`].
//!
//! Each redraw renders the whole editor into a grid sized to the console:
//!
//! 1. [`render_editor`] draws the outer border (if enabled) and insets the
//!    content rect by one cell.
//! 2. [`render_pane`] recomputes the current pane's top line for the rect
//!    height, then hands off to [`render_buffer`].
//! 3. [`render_buffer`] writes one grid row per buffer line, expanding tabs
//!    and dropping anything outside the rect.
//!
//! [`cursor_position`] maps the active cursor to the same screen
//! coordinates, so the hardware cursor lines up with the rendered text.
//!
//! # Example
//!
//! ```
//! use jkl::editor::{Editor, MemoryFiles};
//! use jkl::grid::RuneGrid;
//! use jkl::renderer::render_editor;
//!
//! let mut editor = Editor::new(MemoryFiles::new().with_file("file.txt", "!"));
//! editor.open_file("file.txt");
//!
//! let mut grid = RuneGrid::new(3, 3);
//! render_editor(&mut grid, &mut editor);
//! assert_eq!(grid.to_lines(' '), ["╔═╗", "║!║", "╚═╝"]);
//! ```

pub mod diff;

pub use diff::{DirtySpan, FrameDiff};

use crate::editor::{Buffer, Editor, Settings};
use crate::grid::{BoxGlyphs, Rect, RuneGrid};

/// Rect the current pane is drawn into on a `width x height` surface.
#[must_use]
pub fn content_rect(settings: &Settings, width: u32, height: u32) -> Rect {
    let rect = Rect::of_size(width, height);
    if has_outer_border(settings) {
        rect.inset(1)
    } else {
        rect
    }
}

/// Render the whole editor into `grid`.
///
/// Takes the editor mutably only to update the current pane's top line.
pub fn render_editor(grid: &mut RuneGrid, editor: &mut Editor) {
    let settings = *editor.settings();
    let outer = Rect::of_size(grid.width(), grid.height());

    if has_outer_border(&settings) {
        grid.draw_box_with(outer, &BoxGlyphs::DOUBLE);
    }

    render_pane(grid, editor, content_rect(&settings, grid.width(), grid.height()));
}

/// Render the current pane into `rect`. A pane without a buffer draws nothing.
pub fn render_pane(grid: &mut RuneGrid, editor: &mut Editor, rect: Rect) {
    let settings = *editor.settings();
    let visible_height = usize::try_from(rect.span()).unwrap_or(0);
    editor
        .current_pane_mut()
        .update_top_line(&settings, visible_height);

    let pane = editor.current_pane();
    let Some(buffer) = pane.buffer().and_then(|id| editor.buffer(id)) else {
        return;
    };
    render_buffer(grid, &settings, rect, buffer, pane.top_line());
}

/// Write lines `top_line..=top_line + rect.span()` of `buffer` into `rect`.
///
/// A tab fills `settings.tab_width` cells. Characters that land outside the
/// rect are dropped and do not shift the rest of the row. A `top_line` of 0
/// is read as 1.
pub fn render_buffer(
    grid: &mut RuneGrid,
    settings: &Settings,
    rect: Rect,
    buffer: &Buffer,
    top_line: usize,
) {
    let Ok(span) = usize::try_from(rect.span()) else {
        return;
    };
    let top_line = top_line.max(1);
    let Ok(lines) = buffer.get_lines(top_line, top_line.saturating_add(span)) else {
        return;
    };

    let mut y = rect.y1;
    for line in &lines {
        let mut x = rect.x1;
        let mut put = |x: i32, ch: char| {
            if rect.contains(x, y) {
                grid.set_cell(x, y, ch);
            }
        };

        for ch in line.chars() {
            if x > rect.x2 {
                break;
            }
            if ch == '\t' {
                for _ in 0..settings.tab_width {
                    if x > rect.x2 {
                        break;
                    }
                    put(x, ' ');
                    x = x.saturating_add(1);
                }
            } else {
                put(x, ch);
                x = x.saturating_add(1);
            }
        }
        y += 1;
    }
}

/// Screen position of the current cursor on a `width x height` surface.
///
/// The column accounts for tabs before the cursor. Returns `None` when
/// there is no cursor or it falls outside the pane rect.
#[must_use]
pub fn cursor_position(editor: &Editor, width: u32, height: u32) -> Option<(i32, i32)> {
    let settings = editor.settings();
    let pane = editor.current_pane();
    let cursor = pane.cursor()?;
    let buffer = editor.buffer(cursor.buffer())?;
    let rect = content_rect(settings, width, height);

    let line = buffer.get_line(cursor.line()).unwrap_or_default();
    let cells: usize = line
        .chars()
        .chain(std::iter::repeat(' '))
        .take(cursor.column())
        .map(|ch| if ch == '\t' { settings.tab_width } else { 1 })
        .sum();

    let x = rect.x1.checked_add(i32::try_from(cells).ok()?)?;
    let row = i64::try_from(cursor.line()).ok()? - i64::try_from(pane.top_line()).ok()?;
    let y = rect.y1.checked_add(i32::try_from(row).ok()?)?;

    rect.contains(x, y).then_some((x, y))
}

const fn has_outer_border(settings: &Settings) -> bool {
    settings.borders && settings.outer_border
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{MemoryFiles, Motion};

    fn editor_with(content: &str) -> Editor {
        let mut editor = Editor::new(MemoryFiles::new().with_file("file.txt", content));
        editor.open_file("file.txt");
        editor
    }

    #[test]
    fn test_render_3x3_with_border() {
        let mut editor = editor_with("!");
        let mut grid = RuneGrid::new(3, 3);
        render_editor(&mut grid, &mut editor);
        assert_eq!(grid, RuneGrid::from_rows(&["╔═╗", "║!║", "╚═╝"], '.'));
    }

    #[test]
    fn test_render_3x3_without_border() {
        let mut editor = editor_with("!");
        editor.settings_mut().borders = false;
        let mut grid = RuneGrid::new(3, 3);
        render_editor(&mut grid, &mut editor);
        assert_eq!(grid, RuneGrid::from_rows(&["!..", "...", "..."], '.'));
    }

    #[test]
    fn test_outer_border_flag_alone() {
        let mut editor = editor_with("!");
        editor.settings_mut().outer_border = false;
        let mut grid = RuneGrid::new(2, 1);
        render_editor(&mut grid, &mut editor);
        assert_eq!(grid.to_lines('.'), ["!."]);
    }

    #[test]
    fn test_pane_without_buffer_draws_only_border() {
        let mut editor = Editor::new(MemoryFiles::new());
        let mut grid = RuneGrid::new(4, 3);
        render_editor(&mut grid, &mut editor);
        assert_eq!(grid.to_lines('.'), ["╔══╗", "║..║", "╚══╝"]);
    }

    #[test]
    fn test_render_buffer_clips_to_rect() {
        let buffer = Buffer::from_bytes("abcdef\nghijkl");
        let mut grid = RuneGrid::new(6, 2);
        render_buffer(&mut grid, &Settings::default(), Rect::new(1, 0, 3, 0), &buffer, 1);
        assert_eq!(grid.to_lines('.'), [".abc..", "......"]);
    }

    #[test]
    fn test_render_buffer_tab_width() {
        let buffer = Buffer::from_bytes("\tx");
        let settings = Settings {
            tab_width: 2,
            ..Settings::default()
        };
        let mut grid = RuneGrid::new(4, 1);
        render_buffer(&mut grid, &settings, Rect::new(0, 0, 3, 0), &buffer, 1);
        assert_eq!(grid.to_lines('.'), ["  x."]);
    }

    #[test]
    fn test_render_buffer_huge_tab_stops_at_rect_edge() {
        let buffer = Buffer::from_bytes("a\tb\nc");
        let settings = Settings {
            tab_width: usize::MAX,
            ..Settings::default()
        };
        let mut grid = RuneGrid::new(4, 2);
        render_buffer(&mut grid, &settings, Rect::new(0, 0, 3, 1), &buffer, 1);
        assert_eq!(grid.to_lines('.'), ["a   ", "c..."]);
    }

    #[test]
    fn test_render_buffer_inverted_rect_draws_nothing() {
        let buffer = Buffer::from_bytes("abc");
        let mut grid = RuneGrid::new(3, 3);
        render_buffer(&mut grid, &Settings::default(), Rect::new(0, 2, 2, 1), &buffer, 1);
        assert_eq!(grid, RuneGrid::new(3, 3));
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let content: String = (1..=20).map(|n| format!("{n}\n")).collect();
        let mut editor = editor_with(&content);
        editor.settings_mut().borders = false;
        editor.settings_mut().scroll_offset = 1;
        for _ in 0..9 {
            editor.move_cursor(Motion::DownLine);
        }

        let mut grid = RuneGrid::new(2, 5);
        render_editor(&mut grid, &mut editor);
        assert_eq!(editor.current_pane().top_line(), 7);
        assert_eq!(grid.to_lines('.'), ["7.", "8.", "9.", "10", "11"]);
        assert_eq!(cursor_position(&editor, 2, 5), Some((0, 3)));
    }

    #[test]
    fn test_cursor_position_with_border() {
        let mut editor = editor_with("Hello\nWorld");
        editor.move_cursor(Motion::DownLine);
        editor.move_cursor(Motion::EndOfLine);

        let mut grid = RuneGrid::new(10, 5);
        render_editor(&mut grid, &mut editor);
        assert_eq!(cursor_position(&editor, 10, 5), Some((5, 2)));
    }

    #[test]
    fn test_cursor_position_expands_tabs() {
        let mut editor = editor_with("\tab");
        editor.settings_mut().borders = false;
        editor.move_cursor(Motion::ForwardCharacter);
        editor.move_cursor(Motion::ForwardCharacter);

        assert_eq!(cursor_position(&editor, 10, 2), Some((5, 0)));
    }

    #[test]
    fn test_cursor_position_outside_pane() {
        let editor = editor_with("x");
        assert_eq!(cursor_position(&editor, 2, 2), None);
        assert_eq!(cursor_position(&editor, 3, 3), Some((1, 1)));
    }

    #[test]
    fn test_cursor_position_without_buffer() {
        let editor = Editor::new(MemoryFiles::new());
        assert_eq!(cursor_position(&editor, 10, 10), None);
    }
}
