//! Console backed by a real terminal.

use super::{Console, ConsoleCell};
use crate::ansi::{AnsiWriter, sequences};
use crate::color::Color;
use crate::error::Result;
use crate::input::{Event, InputParser, ParseError, ResizeEvent};
use crate::renderer::FrameDiff;
use crate::terminal::{Terminal, terminal_size};
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Size reported when the terminal cannot be measured.
const FALLBACK_SIZE: (u32, u32) = (80, 24);

/// Terminal console with termbox-style double buffering.
///
/// Cells are collected into a back frame and [`after_draw`] writes only the
/// cells that differ from what is already on screen.
///
/// [`after_draw`]: Console::after_draw
pub struct TerminalConsole<W: Write> {
    terminal: Terminal<W>,
    out: AnsiWriter<Vec<u8>>,
    fixed_size: Option<(u32, u32)>,
    front: Frame,
    back: Frame,
    cursor: Option<(u32, u32)>,
    input: Option<InputThread>,
    initialized: bool,
}

impl TerminalConsole<io::Stdout> {
    /// Console on the process terminal: raw mode, alternate screen and an
    /// input thread reading stdin once initialised.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_terminal(io::stdout(), None)
    }
}

impl<W: Write + Send> TerminalConsole<W> {
    /// Console writing to `writer` with a fixed size and no input.
    pub fn headless(writer: W, width: u32, height: u32) -> Self {
        Self::with_terminal(writer, Some((width, height)))
    }

    fn with_terminal(writer: W, fixed_size: Option<(u32, u32)>) -> Self {
        Self {
            terminal: Terminal::new(writer),
            out: AnsiWriter::new(Vec::new()),
            fixed_size,
            front: Frame::default(),
            back: Frame::default(),
            cursor: None,
            input: None,
            initialized: false,
        }
    }

    /// Change the size of a headless console.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.fixed_size.is_some() {
            self.fixed_size = Some((width, height));
        }
    }

    /// Borrow the output writer.
    pub fn writer(&self) -> &W {
        self.terminal.writer()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn stop_input(&mut self) {
        if let Some(input) = self.input.take() {
            input.stop();
        }
    }
}

impl<W: Write + Send> Console for TerminalConsole<W> {
    fn size(&self) -> (u32, u32) {
        self.fixed_size.unwrap_or_else(|| {
            terminal_size().map_or(FALLBACK_SIZE, |(w, h)| (u32::from(w), u32::from(h)))
        })
    }

    fn init(&mut self, events: Sender<Event>) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        if self.fixed_size.is_none() {
            self.terminal.enter_raw_mode()?;
            self.input = Some(InputThread::spawn(events, self.size())?);
        }
        self.terminal.enter_alt_screen()?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.terminal.flush()?;

        self.front = Frame::default();
        self.initialized = true;
        let (width, height) = self.size();
        info!(width, height, "console initialised");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.stop_input();
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        self.terminal.cleanup()?;
        info!("console closed");
        Ok(())
    }

    fn clear(&mut self, fg: Color, bg: Color) {
        let (width, height) = self.size();
        self.back.reset(width, height, ConsoleCell::blank(fg, bg));
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        let ch = if ch == '\0' { ' ' } else { ch };
        self.back.set(x, y, ConsoleCell { ch, fg, bg });
    }

    fn set_cursor(&mut self, position: Option<(i32, i32)>) {
        self.cursor = position.and_then(|(x, y)| {
            Some((u32::try_from(x).ok()?, u32::try_from(y).ok()?))
        });
    }

    fn after_draw(&mut self) -> Result<()> {
        self.out.reset_state();
        self.out.write_str(sequences::sync::BEGIN);

        let diff = if self.front.same_size(&self.back) {
            FrameDiff::compute(&self.front.cells, &self.back.cells, self.back.width)
        } else {
            self.out.write_str(sequences::CLEAR_SCREEN);
            FrameDiff::compute(&[], &self.back.cells, self.back.width)
        };

        for span in &diff.spans {
            for x in span.x..span.end() {
                if let Some(cell) = self.back.get(x, span.y) {
                    self.out.write_cell(span.y, x, cell.ch, cell.fg, cell.bg);
                }
            }
        }
        self.out.reset_colors();
        self.out.flush()?;

        self.terminal.write_all(self.out.get_ref())?;
        self.out.get_mut().clear();

        let cursor = self
            .cursor
            .filter(|&(x, y)| x < self.back.width && y < self.back.height);
        match cursor {
            Some((x, y)) => {
                self.terminal.move_cursor(x, y)?;
                self.terminal.show_cursor()?;
            }
            None => self.terminal.hide_cursor()?,
        }

        self.terminal
            .write_all(sequences::sync::END.as_bytes())?;
        self.terminal.flush()?;

        self.front.clone_from(&self.back);
        Ok(())
    }
}

impl<W: Write> Drop for TerminalConsole<W> {
    fn drop(&mut self) {
        if let Some(input) = self.input.take() {
            input.stop();
        }
    }
}

/// Row-major frame of console cells.
#[derive(Clone, Debug, Default)]
struct Frame {
    width: u32,
    height: u32,
    cells: Vec<ConsoleCell>,
}

impl Frame {
    fn reset(&mut self, width: u32, height: u32, blank: ConsoleCell) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize((width as usize).saturating_mul(height as usize), blank);
    }

    fn same_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    fn get(&self, x: u32, y: u32) -> Option<&ConsoleCell> {
        self.index(x, y).and_then(|idx| self.cells.get(idx))
    }

    fn set(&mut self, x: i32, y: i32, cell: ConsoleCell) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }
}

/// Background thread turning stdin bytes into [`Event`]s.
struct InputThread {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl InputThread {
    fn spawn(events: Sender<Event>, size: (u32, u32)) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("jkl-input".to_string())
            .spawn(move || input_loop(&events, &thread_stop, size))?;
        Ok(Self { stop, handle })
    }

    /// Signal the thread and wait for it. Reads time out in raw mode, so
    /// the wait is bounded by one read timeout.
    fn stop(self) {
        self.stop.store(true, Ordering::SeqCst);
        if self.handle.join().is_err() {
            warn!("input thread panicked");
        }
    }
}

fn input_loop(events: &Sender<Event>, stop: &AtomicBool, mut size: (u32, u32)) {
    let parser = InputParser::new();
    let mut stdin = io::stdin();
    let mut pending = Vec::new();
    let mut buf = [0u8; 1024];

    while !stop.load(Ordering::SeqCst) {
        let n = match stdin.read(&mut buf) {
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => 0,
            Err(err) => {
                warn!(error = %err, "reading terminal input failed");
                break;
            }
        };
        pending.extend_from_slice(&buf[..n]);

        if !drain_events(&parser, &mut pending, n == 0, events) {
            break;
        }

        if let Ok((w, h)) = terminal_size() {
            let now = (u32::from(w), u32::from(h));
            if now != size {
                size = now;
                debug!(width = w, height = h, "terminal resized");
                if events.send(ResizeEvent::new(w, h).into()).is_err() {
                    break;
                }
            }
        }
    }
    debug!("input thread finished");
}

/// Parse and send every complete event at the front of `pending`.
///
/// `idle` says no new bytes arrived, which turns a lone `ESC` into the
/// Escape key. Returns `false` once the receiver is gone.
pub(crate) fn drain_events(
    parser: &InputParser,
    pending: &mut Vec<u8>,
    idle: bool,
    events: &Sender<Event>,
) -> bool {
    loop {
        let (event, consumed) = match parser.parse(pending) {
            Ok(parsed) => parsed,
            Err(ParseError::Empty) => return true,
            Err(ParseError::Incomplete) => match parser.parse_pending_escape(pending) {
                Some(parsed) if idle => parsed,
                _ => return true,
            },
            Err(ParseError::UnrecognizedSequence(seq)) => {
                debug!(sequence = ?seq, "skipping unrecognised input");
                pending.drain(..seq.len().min(pending.len()));
                continue;
            }
            Err(ParseError::InvalidUtf8) => {
                pending.drain(..1);
                continue;
            }
        };

        pending.drain(..consumed);
        if events.send(event).is_err() {
            return false;
        }
    }
}
