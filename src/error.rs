//! Error types for jkl.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for jkl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for jkl operations.
///
/// None of these are fatal to the process. Buffer lookups are expected to
/// fail during ordinary scroll and cursor boundary checks; lifecycle errors
/// are reported and then ignored by whoever is shutting down.
#[derive(Debug, Error)]
pub enum Error {
    /// A 1-based line number that the buffer does not contain.
    #[error("line {line} not found")]
    LineNotFound { line: usize },

    /// A line range whose first line comes after its last.
    #[error("invalid range: first line {first} > last line {last}")]
    InvalidRange { first: usize, last: usize },

    /// A service state transition to the state it is already in.
    #[error("service state already set to {}", state_name(.running))]
    AlreadyInState { running: bool },

    /// A wait for a service state that did not arrive in time.
    #[error("timed out after {timeout:?} waiting for service to be {}", state_name(.running))]
    Timeout { running: bool, timeout: Duration },

    /// Box drawing called with a glyph set of unsupported size.
    #[error("box drawing takes 0, 1 or 5 extra glyphs, got {0}")]
    InvalidGlyphCount(usize),

    /// `run()` called on a service that is already running.
    #[error("service already running")]
    AlreadyRunning,

    /// I/O error from terminal or file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn state_name(running: &bool) -> &'static str {
    if *running { "running" } else { "stopped" }
}
