//! `jkl` - a small modal text viewer for the terminal
//!
//! The crate is built around a text-editing core and a character-grid
//! renderer:
//!
//! - [`editor`] holds buffers, panes and cursors behind stable integer handles.
//! - [`grid`] is a clipped 2-D character surface with box drawing.
//! - [`renderer`] projects the current pane onto a [`grid::RuneGrid`].
//! - [`ui`] owns a [`console::Console`] and blits rendered grids to it.
//! - [`app`] runs the poll loop that dispatches keys and redraws when idle.
//!
//! Long-running pieces share the running/stopped contract in [`service`].
//!
//! # Example
//!
//! ```
//! use jkl::editor::{Editor, MemoryFiles, Motion};
//! use jkl::grid::RuneGrid;
//! use jkl::renderer::render_editor;
//!
//! let files = MemoryFiles::new().with_file("hello.txt", "Hello\nWorld");
//! let mut editor = Editor::new(files);
//! editor.open_file("hello.txt");
//! editor.move_cursor(Motion::DownLine);
//!
//! let mut grid = RuneGrid::new(7, 4);
//! render_editor(&mut grid, &mut editor);
//! assert_eq!(grid.to_lines(' '), ["╔═════╗", "║Hello║", "║World║", "╚═════╝"]);
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow console::ConsoleCell etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod app;
pub mod cli;
pub mod color;
pub mod console;
pub mod editor;
pub mod error;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod service;
pub mod terminal;
pub mod ui;

// Re-export core types at crate root
pub use app::App;
pub use color::Color;
pub use console::{Console, FakeConsole, TerminalConsole};
pub use editor::{Buffer, BufferId, Cursor, Editor, Motion, Pane, PaneId, Settings};
pub use error::{Error, Result};
pub use grid::{BoxGlyphs, Rect, RuneGrid};
pub use service::{Service, State};
pub use ui::{TerminalUi, Ui};

// Re-export input types
pub use input::{Event, InputParser, KeyCode, KeyEvent, KeyModifiers};

// Re-export terminal helpers
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
