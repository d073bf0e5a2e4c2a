//! Pane: a viewport onto one buffer.

use super::cursor::Cursor;
use super::{BufferId, Settings};
use std::collections::HashMap;

/// A viewport with its own scroll position and one cursor per buffer shown.
#[derive(Clone, Debug)]
pub struct Pane {
    buffer: Option<BufferId>,
    cursors: HashMap<BufferId, Cursor>,
    top_line: usize,
}

impl Default for Pane {
    fn default() -> Self {
        Self::new()
    }
}

impl Pane {
    /// Create a pane with no buffer bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: None,
            cursors: HashMap::new(),
            top_line: 1,
        }
    }

    /// The buffer currently shown, if any.
    #[must_use]
    pub const fn buffer(&self) -> Option<BufferId> {
        self.buffer
    }

    /// Show `buffer` in this pane.
    ///
    /// The first time a buffer is shown it gets a cursor at its start;
    /// switching back to it later restores the cursor where it was left.
    pub fn set_buffer(&mut self, buffer: BufferId) {
        self.buffer = Some(buffer);
        self.cursors
            .entry(buffer)
            .or_insert_with(|| Cursor::new(buffer));
    }

    /// Cursor for the bound buffer.
    #[must_use]
    pub fn cursor(&self) -> Option<&Cursor> {
        self.buffer.and_then(|id| self.cursors.get(&id))
    }

    /// Mutable cursor for the bound buffer.
    pub fn cursor_mut(&mut self) -> Option<&mut Cursor> {
        let id = self.buffer?;
        self.cursors.get_mut(&id)
    }

    /// 1-based line shown on the first row.
    #[must_use]
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    /// Recompute [`top_line`](Self::top_line) so the cursor stays at least
    /// `settings.scroll_offset` rows from either edge of a viewport
    /// `visible_height` rows tall.
    ///
    /// When the margin cannot fit, the cursor line is centred instead. The
    /// result depends only on the cursor line and the previous top line, so
    /// repeated calls without cursor movement leave it unchanged.
    pub fn update_top_line(&mut self, settings: &Settings, visible_height: usize) {
        let Some(cursor) = self.cursor() else {
            return;
        };

        let line = to_signed(cursor.line());
        let height = to_signed(visible_height);
        let offset = to_signed(settings.scroll_offset);
        let top = to_signed(self.top_line);

        let new_top = if offset * 2 > height {
            line - height / 2
        } else if top > line - offset {
            line - offset
        } else if top + height < line + offset {
            line + offset - height
        } else {
            top
        };

        self.top_line = usize::try_from(new_top.max(1)).unwrap_or(1);
    }
}

fn to_signed(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX / 4)
}
