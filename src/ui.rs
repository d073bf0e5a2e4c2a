//! UI service: owns the console and projects the editor onto it.

use crate::color::Color;
use crate::console::Console;
use crate::editor::Editor;
use crate::error::{Error, Result};
use crate::grid::RuneGrid;
use crate::input::Event;
use crate::renderer::{cursor_position, render_editor};
use crate::service::{DEFAULT_TIMEOUT, Service, State, wait_until_stopped};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};

/// A UI the application loop can drive.
///
/// `run` blocks on its own thread for as long as the UI owns the console;
/// the application thread polls [`try_event`](Ui::try_event) and calls
/// [`redraw`](Ui::redraw) when idle.
pub trait Ui: Service {
    /// Next pending input event, if any.
    fn try_event(&self) -> Option<Event>;

    /// Render `editor` and present it. Does nothing while stopped.
    fn redraw(&self, editor: &mut Editor);
}

/// [`Ui`] over any [`Console`].
pub struct TerminalUi<C: Console> {
    state: State,
    console: Mutex<C>,
    events_tx: Sender<Event>,
    events_rx: Mutex<Receiver<Event>>,
    quit: Mutex<Option<Sender<()>>>,
    fg: Color,
    bg: Color,
}

impl<C: Console> TerminalUi<C> {
    /// Create a stopped UI drawing white on red.
    pub fn new(console: C) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            state: State::new(),
            console: Mutex::new(console),
            events_tx,
            events_rx: Mutex::new(events_rx),
            quit: Mutex::new(None),
            fg: Color::White,
            bg: Color::Red,
        }
    }

    /// Builder-style colour override.
    #[must_use]
    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    #[must_use]
    pub const fn colors(&self) -> (Color, Color) {
        (self.fg, self.bg)
    }

    fn console(&self) -> MutexGuard<'_, C> {
        self.console.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn quit_slot(&self) -> MutexGuard<'_, Option<Sender<()>>> {
        self.quit.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to running and arm a fresh quit channel.
    fn arm(&self) -> Result<Receiver<()>> {
        let mut slot = self.quit_slot();
        self.state.set_running().map_err(|_| Error::AlreadyRunning)?;
        let (tx, rx) = mpsc::channel();
        *slot = Some(tx);
        Ok(rx)
    }
}

impl<C: Console> Service for TerminalUi<C> {
    fn run(&self) -> Result<()> {
        let quit = {
            // Held through init so redraws wait for an initialised console.
            let mut console = self.console();
            let quit = self.arm()?;
            if let Err(err) = console.init(self.events_tx.clone()) {
                error!(error = %err, "console init failed");
                self.quit_slot().take();
                let _ = self.state.set_stopped();
                return Err(err);
            }
            quit
        };
        info!("ui running");

        // A quit message and a dropped sender both end the wait.
        let _ = quit.recv();

        let closed = self.console().close();
        if let Err(err) = &closed {
            warn!(error = %err, "console close failed");
        }
        let _ = self.state.set_stopped();
        info!("ui stopped");
        closed
    }

    fn stop(&self) {
        {
            let mut slot = self.quit_slot();
            if !self.state.running() {
                return;
            }
            if let Some(quit) = slot.take() {
                let _ = quit.send(());
            }
        }

        if let Err(err) = wait_until_stopped(self, DEFAULT_TIMEOUT) {
            warn!(error = %err, "ui did not stop");
        }
    }

    fn running(&self) -> bool {
        self.state.running()
    }
}

impl<C: Console> Ui for TerminalUi<C> {
    fn try_event(&self) -> Option<Event> {
        self.events_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }

    fn redraw(&self, editor: &mut Editor) {
        if !self.running() {
            return;
        }

        let mut console = self.console();
        console.clear(self.fg, self.bg);
        let (width, height) = console.size();

        let mut grid = RuneGrid::new(width, height);
        render_editor(&mut grid, editor);
        for (x, y, ch) in grid.iter_cells() {
            if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
                console.set_cell(x, y, ch, self.fg, self.bg);
            }
        }

        console.set_cursor(cursor_position(editor, width, height));
        if let Err(err) = console.after_draw() {
            warn!(error = %err, "presenting frame failed");
        }
    }
}
