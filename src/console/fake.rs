//! In-memory console for tests.

use super::{Console, ConsoleCell};
use crate::color::Color;
use crate::error::Result;
use crate::grid::RuneGrid;
use crate::input::{Event, ResizeEvent};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default size, matching a classic 80x24 terminal.
const DEFAULT_SIZE: (u32, u32) = (80, 24);

/// Console that records frames in memory.
///
/// Clones share state: hand one clone to the UI and keep another to inject
/// events and inspect what was drawn.
#[derive(Clone, Debug, Default)]
pub struct FakeConsole {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Debug)]
struct FakeState {
    width: u32,
    height: u32,
    pending: Frame,
    screen: Frame,
    pending_cursor: Option<(i32, i32)>,
    cursor: Option<(i32, i32)>,
    events: Option<Sender<Event>>,
    queued: Vec<Event>,
    initialized: bool,
    closed: bool,
    draws: usize,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            pending: Frame::default(),
            screen: Frame::default(),
            pending_cursor: None,
            cursor: None,
            events: None,
            queued: Vec::new(),
            initialized: false,
            closed: false,
            draws: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Frame {
    width: u32,
    height: u32,
    cells: Vec<ConsoleCell>,
}

impl Frame {
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

impl FakeConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(width: u32, height: u32) -> Self {
        let console = Self::default();
        {
            let mut state = console.lock();
            state.width = width;
            state.height = height;
        }
        console
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver an event as if it came from the terminal.
    ///
    /// Events sent before [`init`](Console::init) are queued and delivered
    /// on init.
    pub fn send_event(&self, event: impl Into<Event>) {
        let event = event.into();
        let mut state = self.lock();
        let delivered = state
            .events
            .as_ref()
            .is_some_and(|events| events.send(event).is_ok());
        if !delivered {
            state.queued.push(event);
        }
    }

    /// Change the console size and report it with a resize event.
    pub fn set_size(&self, width: u16, height: u16) {
        {
            let mut state = self.lock();
            state.width = u32::from(width);
            state.height = u32::from(height);
        }
        self.send_event(ResizeEvent::new(width, height));
    }

    /// Characters of the last presented frame.
    ///
    /// Unpainted cells are `' '`, as cleared by [`Console::clear`].
    #[must_use]
    pub fn grid(&self) -> RuneGrid {
        let state = self.lock();
        let mut grid = RuneGrid::new(state.screen.width, state.screen.height);
        for (idx, cell) in state.screen.cells.iter().enumerate() {
            let width = state.screen.width as usize;
            if let (Ok(x), Ok(y)) = (i32::try_from(idx % width), i32::try_from(idx / width)) {
                grid.set_cell(x, y, cell.ch);
            }
        }
        grid
    }

    /// Cell of the last presented frame.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<ConsoleCell> {
        let state = self.lock();
        state
            .screen
            .index(x, y)
            .and_then(|idx| state.screen.cells.get(idx).copied())
    }

    /// Hardware cursor of the last presented frame.
    #[must_use]
    pub fn cursor(&self) -> Option<(i32, i32)> {
        self.lock().cursor
    }

    /// Number of completed [`after_draw`](Console::after_draw) calls.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.lock().draws
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl Console for FakeConsole {
    fn size(&self) -> (u32, u32) {
        let state = self.lock();
        (state.width, state.height)
    }

    fn init(&mut self, events: Sender<Event>) -> Result<()> {
        let mut state = self.lock();
        for event in state.queued.drain(..) {
            let _ = events.send(event);
        }
        state.events = Some(events);
        state.initialized = true;
        state.closed = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.events = None;
        state.initialized = false;
        state.closed = true;
        Ok(())
    }

    fn clear(&mut self, fg: Color, bg: Color) {
        let mut state = self.lock();
        let (width, height) = (state.width, state.height);
        state.pending = Frame {
            width,
            height,
            cells: vec![ConsoleCell::blank(fg, bg); width as usize * height as usize],
        };
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        let mut state = self.lock();
        if let Some(idx) = state.pending.index(x, y) {
            let ch = if ch == '\0' { ' ' } else { ch };
            state.pending.cells[idx] = ConsoleCell { ch, fg, bg };
        }
    }

    fn set_cursor(&mut self, position: Option<(i32, i32)>) {
        self.lock().pending_cursor = position;
    }

    fn after_draw(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.screen = state.pending.clone();
        state.cursor = state.pending_cursor;
        state.draws += 1;
        Ok(())
    }
}
