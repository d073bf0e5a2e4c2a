//! Frame diffing so only changed cells are written to the terminal.

/// A horizontal run of changed cells on one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtySpan {
    pub x: u32,
    pub y: u32,
    pub len: u32,
}

impl DirtySpan {
    #[must_use]
    pub const fn new(x: u32, y: u32, len: u32) -> Self {
        Self { x, y, len }
    }

    /// Column one past the last cell of the span.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.x + self.len
    }
}

/// Result of comparing two frames of the same size.
#[derive(Clone, Debug, Default)]
pub struct FrameDiff {
    /// Changed cells as `(x, y)`, row-major.
    pub changed_cells: Vec<(u32, u32)>,
    /// Changed cells merged into runs per row.
    pub spans: Vec<DirtySpan>,
}

impl FrameDiff {
    /// Compare two row-major frames `width` cells wide.
    ///
    /// Frames of different length are treated as entirely changed, which is
    /// what a resize needs.
    #[must_use]
    pub fn compute<T: PartialEq>(old: &[T], new: &[T], width: u32) -> Self {
        let width = width.max(1);
        let changed_cells: Vec<(u32, u32)> = new
            .iter()
            .enumerate()
            .filter(|&(idx, cell)| old.len() != new.len() || old[idx] != *cell)
            .map(|(idx, _)| {
                let idx = u32::try_from(idx).unwrap_or(u32::MAX);
                (idx % width, idx / width)
            })
            .collect();

        let spans = Self::merge_into_spans(&changed_cells);
        Self {
            changed_cells,
            spans,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_cells.is_empty()
    }

    #[must_use]
    pub fn change_count(&self) -> usize {
        self.changed_cells.len()
    }

    fn merge_into_spans(cells: &[(u32, u32)]) -> Vec<DirtySpan> {
        let mut spans: Vec<DirtySpan> = Vec::new();
        for &(x, y) in cells {
            match spans.last_mut() {
                Some(span) if span.y == y && span.end() == x => span.len += 1,
                _ => spans.push(DirtySpan::new(x, y, 1)),
            }
        }
        spans
    }
}
