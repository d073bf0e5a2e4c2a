//! Log output.
//!
//! The terminal belongs to the UI while the editor runs, so logs go to a
//! file. Without one no subscriber is installed and the `tracing` macros
//! cost next to nothing.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "jkl=info";

/// Install a global subscriber appending to `path`.
///
/// `filter` overrides both `RUST_LOG` and [`DEFAULT_FILTER`]. Returns
/// `Ok(false)` if another subscriber was already installed.
pub fn init(path: &Path, filter: Option<&str>) -> io::Result<bool> {
    let file = open_log(path)?;
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .is_ok();
    Ok(installed)
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
