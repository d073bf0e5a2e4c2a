//! `jkl`: view files in the terminal with vi-style movement.
//!
//! ```bash
//! jkl README.md src/lib.rs
//! jkl --no-borders --tab-width 8 Makefile
//! JKL_LOG=/tmp/jkl.log RUST_LOG=jkl=debug jkl notes.txt
//! ```
//!
//! `h j k l` (or the arrow keys) move the cursor, `0`/`$` jump to the
//! start and end of the line, `q` or Ctrl+C quits.

use jkl::cli::parse_args;
use jkl::console::TerminalConsole;
use jkl::editor::{Editor, LocalFiles};
use jkl::service::Service;
use jkl::terminal::is_tty;
use jkl::ui::TerminalUi;
use jkl::{App, logging};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    if let Some(path) = &cli.log_file {
        if let Err(err) = logging::init(path, None) {
            eprintln!("jkl: cannot open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }

    if !is_tty(&io::stdin()) || !is_tty(&io::stdout()) {
        eprintln!("jkl: stdin and stdout must be a terminal");
        return ExitCode::FAILURE;
    }

    let mut editor = Editor::new(LocalFiles);
    cli.apply(&mut editor);
    info!(files = cli.files.len(), "starting");

    let ui = TerminalUi::new(TerminalConsole::stdout());
    let app = App::new(editor, ui).with_redraw_interval(cli.redraw_interval());

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "exited with error");
            eprintln!("jkl: {err}");
            ExitCode::FAILURE
        }
    }
}
