//! Editor state: buffers, panes and settings.
//!
//! Buffers and panes live in append-only arenas owned by [`Editor`] and are
//! addressed by [`BufferId`] and [`PaneId`]. A pane refers to its buffer and
//! keys its cursors by `BufferId`, so nothing holds a reference into another
//! collection and all mutation goes through the editor.
//!
//! # Example
//!
//! ```
//! use jkl::editor::{Editor, MemoryFiles, Motion};
//!
//! let files = MemoryFiles::new().with_file("hello.txt", "Hello\nWorld");
//! let mut editor = Editor::new(files);
//! editor.open_file("hello.txt");
//!
//! assert!(editor.move_cursor(Motion::DownLine));
//! assert_eq!(editor.current_cursor().unwrap().position(), (0, 2));
//! ```

mod buffer;
mod cursor;
mod files;
mod pane;

pub use buffer::Buffer;
pub use cursor::{Cursor, Motion};
pub use files::{FileAccess, LocalFiles, MemoryFiles};
pub use pane::Pane;

use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Stable handle to a buffer owned by an [`Editor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub usize);

/// Stable handle to a pane owned by an [`Editor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub usize);

/// Global editor settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Draw borders at all.
    pub borders: bool,
    /// Draw the border around the whole editor (only if `borders` is set).
    pub outer_border: bool,
    /// Cells a tab expands to. Always at least 1.
    pub tab_width: usize,
    /// Rows kept between the cursor and the top or bottom edge when scrolling.
    pub scroll_offset: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            borders: true,
            outer_border: true,
            tab_width: 4,
            scroll_offset: 3,
        }
    }
}

/// Owns every buffer and pane, and which pane is active.
pub struct Editor {
    buffers: Vec<Buffer>,
    panes: Vec<Pane>,
    current_pane: PaneId,
    settings: Settings,
    files: Box<dyn FileAccess>,
}

impl Editor {
    /// Create an editor with one empty pane, reading files through `files`.
    pub fn new(files: impl FileAccess + 'static) -> Self {
        Self {
            buffers: Vec::new(),
            panes: vec![Pane::new()],
            current_pane: PaneId(0),
            settings: Settings::default(),
            files: Box::new(files),
        }
    }

    /// Builder-style settings override.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Open each path into a new buffer and show the first one.
    pub fn open_files<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut first = None;
        for path in paths {
            let buffer = self.load(path.as_ref());
            let id = self.add_buffer(buffer);
            first.get_or_insert(id);
        }

        if let Some(id) = first {
            self.set_current_buffer(id);
        }
    }

    /// Open one path and show it.
    pub fn open_file(&mut self, path: impl AsRef<Path>) {
        self.open_files([path]);
    }

    /// Append a buffer and return its handle.
    pub fn add_buffer(&mut self, buffer: Buffer) -> BufferId {
        self.buffers.push(buffer);
        BufferId(self.buffers.len() - 1)
    }

    /// Handle of the most recently added buffer.
    #[must_use]
    pub fn last_buffer(&self) -> Option<BufferId> {
        self.buffers.len().checked_sub(1).map(BufferId)
    }

    #[must_use]
    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(id.0)
    }

    /// All buffers in the order they were added.
    #[must_use]
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    /// Buffer shown in the current pane.
    #[must_use]
    pub fn current_buffer(&self) -> Option<BufferId> {
        self.current_pane().buffer()
    }

    /// Show `id` in the current pane. Unknown handles are ignored.
    pub fn set_current_buffer(&mut self, id: BufferId) {
        if id.0 >= self.buffers.len() {
            warn!(buffer = id.0, "ignoring unknown buffer");
            return;
        }
        self.current_pane_mut().set_buffer(id);
    }

    #[must_use]
    pub const fn current_pane_id(&self) -> PaneId {
        self.current_pane
    }

    #[must_use]
    pub fn current_pane(&self) -> &Pane {
        &self.panes[self.current_pane.0]
    }

    pub fn current_pane_mut(&mut self) -> &mut Pane {
        &mut self.panes[self.current_pane.0]
    }

    #[must_use]
    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    /// Cursor of the current pane's buffer.
    #[must_use]
    pub fn current_cursor(&self) -> Option<&Cursor> {
        self.current_pane().cursor()
    }

    /// Move the current cursor. Returns whether its position changed.
    pub fn move_cursor(&mut self, motion: Motion) -> bool {
        let pane = &mut self.panes[self.current_pane.0];
        let Some(buffer) = pane.buffer().and_then(|id| self.buffers.get(id.0)) else {
            return false;
        };
        let Some(cursor) = pane.cursor_mut() else {
            return false;
        };

        let before = cursor.position();
        let target = cursor.candidate(motion, buffer);
        cursor.move_to(target);
        before != target
    }

    fn load(&self, path: &Path) -> Buffer {
        let mut buffer = Buffer::new();
        buffer.set_filename(path.to_string_lossy());

        match self.files.read_file(path) {
            Ok(data) => {
                debug!(path = %path.display(), bytes = data.len(), "opened file");
                buffer.set_data(&data);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "new file");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read file, opening empty buffer");
            }
        }

        buffer
    }
}
