//! The application loop tying the editor to a UI service.
//!
//! [`App::run`] starts the UI on its own thread and then polls, in this
//! order of priority:
//!
//! 1. the quit channel, which ends the loop;
//! 2. one pending UI event, which is dispatched to the key map;
//! 3. otherwise a redraw, followed by an optional pacing sleep.
//!
//! All editor mutation happens on the thread running the loop.

use crate::editor::{Editor, Motion};
use crate::error::{Error, Result};
use crate::input::{Event, KeyCode, KeyEvent};
use crate::service::{DEFAULT_TIMEOUT, Service, State, wait_until_running, wait_until_stopped};
use crate::ui::Ui;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default pause after an idle redraw, about 60 frames per second.
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_millis(16);

/// Editor application driven by a [`Ui`].
pub struct App<U: Ui + 'static> {
    state: State,
    editor: Mutex<Editor>,
    ui: Arc<U>,
    quit: Mutex<Option<Sender<()>>>,
    redraw_interval: Duration,
}

impl<U: Ui + 'static> App<U> {
    pub fn new(editor: Editor, ui: U) -> Self {
        Self {
            state: State::new(),
            editor: Mutex::new(editor),
            ui: Arc::new(ui),
            quit: Mutex::new(None),
            redraw_interval: DEFAULT_REDRAW_INTERVAL,
        }
    }

    /// Builder-style override of the idle pause. Zero polls without pausing.
    #[must_use]
    pub fn with_redraw_interval(mut self, interval: Duration) -> Self {
        self.redraw_interval = interval;
        self
    }

    /// Lock the editor.
    pub fn editor(&self) -> MutexGuard<'_, Editor> {
        self.editor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Ask the loop to finish without waiting for it.
    ///
    /// Returns `false` if the app is not running or quit was already requested.
    pub fn request_quit(&self) -> bool {
        let mut slot = self.quit_slot();
        if !self.state.running() {
            return false;
        }
        slot.take().is_some_and(|quit| quit.send(()).is_ok())
    }

    /// Dispatch one UI event.
    pub fn handle_event(&self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(size) => {
                debug!(width = size.width, height = size.height, "resize");
            }
        }
    }

    fn handle_key(&self, key: KeyEvent) {
        if key.is_ctrl_c() || key.plain_char() == Some('q') {
            debug!("quit key");
            self.request_quit();
            return;
        }

        match motion_for(&key) {
            Some(motion) => {
                self.editor().move_cursor(motion);
            }
            None => debug!(?key, "unbound key"),
        }
    }

    fn quit_slot(&self) -> MutexGuard<'_, Option<Sender<()>>> {
        self.quit.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn arm(&self) -> Result<Receiver<()>> {
        let mut slot = self.quit_slot();
        self.state.set_running().map_err(|_| Error::AlreadyRunning)?;
        let (tx, rx) = mpsc::channel();
        *slot = Some(tx);
        Ok(rx)
    }

    fn spawn_ui(&self) -> Result<JoinHandle<Result<()>>> {
        let ui = Arc::clone(&self.ui);
        let handle = thread::Builder::new()
            .name("jkl-ui".to_string())
            .spawn(move || ui.run())?;
        Ok(handle)
    }

    fn event_loop(&self, quit: &Receiver<()>, ui_thread: &JoinHandle<Result<()>>) {
        loop {
            match quit.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => {}
            }

            if let Some(event) = self.ui.try_event() {
                self.handle_event(event);
                continue;
            }

            if ui_thread.is_finished() {
                warn!("ui exited, stopping");
                break;
            }

            self.ui.redraw(&mut self.editor());
            if !self.redraw_interval.is_zero() {
                thread::sleep(self.redraw_interval);
            }
        }
    }
}

impl<U: Ui + 'static> Service for App<U> {
    fn run(&self) -> Result<()> {
        let quit = self.arm()?;
        info!("app running");

        let ui_thread = match self.spawn_ui() {
            Ok(handle) => handle,
            Err(err) => {
                self.quit_slot().take();
                let _ = self.state.set_stopped();
                return Err(err);
            }
        };
        if let Err(err) = wait_until_running(self.ui.as_ref(), DEFAULT_TIMEOUT) {
            warn!(error = %err, "ui did not start");
        }

        self.event_loop(&quit, &ui_thread);

        self.ui.stop();
        let result = ui_thread.join().unwrap_or_else(|_| {
            error!("ui thread panicked");
            Ok(())
        });
        self.quit_slot().take();
        let _ = self.state.set_stopped();
        info!("app stopped");
        result
    }

    fn stop(&self) {
        if !self.state.running() {
            return;
        }
        // Quit may already be pending from a key or another caller.
        self.request_quit();
        if let Err(err) = wait_until_stopped(self.ui.as_ref(), DEFAULT_TIMEOUT) {
            warn!(error = %err, "ui did not stop");
        }
        if let Err(err) = wait_until_stopped(self, DEFAULT_TIMEOUT) {
            warn!(error = %err, "app did not stop");
        }
    }

    fn running(&self) -> bool {
        self.state.running()
    }
}

/// Cursor motion bound to `key`, if any.
#[must_use]
pub fn motion_for(key: &KeyEvent) -> Option<Motion> {
    if !key.modifiers.is_empty() {
        return None;
    }
    let motion = match key.code {
        KeyCode::Char('j') | KeyCode::Down => Motion::DownLine,
        KeyCode::Char('k') | KeyCode::Up => Motion::UpLine,
        KeyCode::Char('h') | KeyCode::Left => Motion::BackCharacter,
        KeyCode::Char('l') | KeyCode::Right => Motion::ForwardCharacter,
        KeyCode::Char('0') | KeyCode::Home => Motion::BeginningOfLine,
        KeyCode::Char('$') | KeyCode::End => Motion::EndOfLine,
        _ => return None,
    };
    Some(motion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::FakeConsole;
    use crate::editor::MemoryFiles;
    use crate::input::{KeyModifiers, ResizeEvent};
    use crate::ui::TerminalUi;
    use std::collections::VecDeque;

    /// Ui that replays queued events and records the cursor at each redraw.
    ///
    /// The first redraw sends on `quit_on_redraw` so the loop ends.
    #[derive(Default)]
    struct ScriptedUi {
        events: Mutex<VecDeque<Event>>,
        redraws: Mutex<Vec<(usize, usize)>>,
        quit_on_redraw: Mutex<Option<Sender<()>>>,
    }

    impl Service for ScriptedUi {
        fn run(&self) -> Result<()> {
            Ok(())
        }

        fn stop(&self) {}

        fn running(&self) -> bool {
            true
        }
    }

    impl Ui for ScriptedUi {
        fn try_event(&self) -> Option<Event> {
            self.events.lock().unwrap().pop_front()
        }

        fn redraw(&self, editor: &mut Editor) {
            let position = editor.current_cursor().map_or((0, 0), |cursor| cursor.position());
            self.redraws.lock().unwrap().push(position);
            if let Some(quit) = self.quit_on_redraw.lock().unwrap().take() {
                quit.send(()).unwrap();
            }
        }
    }

    fn scripted_app(keys: &[char]) -> App<ScriptedUi> {
        let mut editor = Editor::new(MemoryFiles::new().with_file("file.txt", "one\ntwo\nthree"));
        editor.open_file("file.txt");
        let ui = ScriptedUi::default();
        ui.events
            .lock()
            .unwrap()
            .extend(keys.iter().map(|&ch| Event::from(KeyEvent::char(ch))));
        App::new(editor, ui).with_redraw_interval(Duration::ZERO)
    }

    /// Thread that stays alive until the returned sender is dropped.
    fn idle_ui_thread() -> (Sender<()>, JoinHandle<Result<()>>) {
        let (hold, wait) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let _ = wait.recv();
            Ok(())
        });
        (hold, handle)
    }

    fn app(content: &str) -> App<TerminalUi<FakeConsole>> {
        let mut editor = Editor::new(MemoryFiles::new().with_file("file.txt", content));
        editor.open_file("file.txt");
        App::new(editor, TerminalUi::new(FakeConsole::new()))
    }

    #[test]
    fn test_motion_for_keys() {
        assert_eq!(motion_for(&KeyEvent::char('j')), Some(Motion::DownLine));
        assert_eq!(motion_for(&KeyEvent::key(KeyCode::Up)), Some(Motion::UpLine));
        assert_eq!(motion_for(&KeyEvent::char('h')), Some(Motion::BackCharacter));
        assert_eq!(motion_for(&KeyEvent::key(KeyCode::Right)), Some(Motion::ForwardCharacter));
        assert_eq!(motion_for(&KeyEvent::char('0')), Some(Motion::BeginningOfLine));
        assert_eq!(motion_for(&KeyEvent::key(KeyCode::End)), Some(Motion::EndOfLine));
        assert_eq!(motion_for(&KeyEvent::char('x')), None);
        assert_eq!(
            motion_for(&KeyEvent::new(KeyCode::Char('j'), KeyModifiers::ALT)),
            None
        );
    }

    #[test]
    fn test_handle_event_moves_cursor() {
        let app = app("one\ntwo");
        app.handle_event(KeyEvent::char('j').into());
        app.handle_event(KeyEvent::char('l').into());
        app.handle_event(ResizeEvent::new(10, 10).into());

        let editor = app.editor();
        assert_eq!(editor.current_cursor().unwrap().position(), (1, 2));
    }

    #[test]
    fn test_pending_quit_wins_over_events_and_redraw() {
        let app = scripted_app(&['j', 'j']);
        let quit = app.arm().unwrap();
        assert!(app.request_quit());

        let (hold, ui_thread) = idle_ui_thread();
        app.event_loop(&quit, &ui_thread);
        drop(hold);
        ui_thread.join().unwrap().unwrap();

        assert_eq!(app.ui().events.lock().unwrap().len(), 2);
        assert!(app.ui().redraws.lock().unwrap().is_empty());
        assert_eq!(app.editor().current_cursor().unwrap().position(), (0, 1));
    }

    #[test]
    fn test_pending_events_handled_before_redraw() {
        let app = scripted_app(&['j', 'j', 'l']);
        let quit = app.arm().unwrap();
        let tx = app.quit_slot().clone();
        *app.ui().quit_on_redraw.lock().unwrap() = tx;

        let (hold, ui_thread) = idle_ui_thread();
        app.event_loop(&quit, &ui_thread);
        drop(hold);
        ui_thread.join().unwrap().unwrap();

        assert!(app.ui().events.lock().unwrap().is_empty());
        assert_eq!(*app.ui().redraws.lock().unwrap(), [(1, 3)]);
    }

    #[test]
    fn test_request_quit_when_stopped() {
        let app = app("");
        assert!(!app.request_quit());
        app.stop();
        assert!(!app.running());
    }
}
