//! Shared helpers for integration tests.

#![allow(dead_code)]
#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry

use jkl::console::FakeConsole;
use jkl::editor::{Editor, MemoryFiles};
use jkl::service::{DEFAULT_TIMEOUT, Service, wait_until_running};
use jkl::ui::TerminalUi;
use jkl::{App, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub type FakeApp = App<TerminalUi<FakeConsole>>;

/// Editor with `files` in memory and the first one opened.
pub fn editor_with(files: &[(&str, &str)]) -> Editor {
    let mut memory = MemoryFiles::new();
    for (path, data) in files {
        memory.insert(*path, *data);
    }
    let mut editor = Editor::new(memory);
    editor.open_files(files.iter().map(|(path, _)| *path));
    editor
}

/// Running app on a background thread, plus a handle on its console.
pub struct Running {
    pub app: Arc<FakeApp>,
    pub console: FakeConsole,
    pub thread: Option<JoinHandle<Result<()>>>,
}

impl Running {
    pub fn start(editor: Editor, console: FakeConsole) -> Self {
        let app = Arc::new(
            App::new(editor, TerminalUi::new(console.clone())).with_redraw_interval(Duration::from_millis(1)),
        );
        let runner = Arc::clone(&app);
        let thread = thread::spawn(move || runner.run());
        wait_until_running(app.as_ref(), DEFAULT_TIMEOUT).expect("app did not start");
        wait_until_running(app.ui(), DEFAULT_TIMEOUT).expect("ui did not start");
        Self {
            app,
            console,
            thread: Some(thread),
        }
    }

    /// Wait for the next frame drawn after this call.
    pub fn next_frame(&self) {
        let seen = self.console.draw_count();
        assert!(
            wait_for(|| self.console.draw_count() > seen + 1),
            "no frame drawn"
        );
    }

    pub fn join(mut self) -> Result<()> {
        self.thread
            .take()
            .expect("already joined")
            .join()
            .expect("app thread panicked")
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.app.stop();
        }
    }
}

/// Poll `condition` for up to two seconds.
pub fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(2) {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}
