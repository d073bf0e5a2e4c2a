//! Running/stopped lifecycle shared by long-running components.
//!
//! Every component that must be startable and stoppable from another thread
//! (the [`App`](crate::app::App) loop and the [`Ui`](crate::ui::Ui) service)
//! tracks its state with a [`State`] and implements [`Service`]. Callers that
//! need a synchronous start or stop poll the state with [`wait_until`].
//!
//! # Example
//!
//! ```
//! use jkl::service::State;
//!
//! let state = State::new();
//! state.set_running().unwrap();
//! assert!(state.running());
//! assert!(state.set_running().is_err());
//! ```

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// How often [`wait_until`] re-checks [`Service::running`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Default bound used by callers that block on a state transition.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// A component with a blocking run loop that ends when `stop()` is called.
pub trait Service: Send + Sync {
    /// Run until stopped. Fails with [`Error::AlreadyRunning`] if already running.
    fn run(&self) -> Result<()>;

    /// Ask the run loop to finish. Returns immediately if not running.
    fn stop(&self);

    /// Non-blocking read of the current state.
    fn running(&self) -> bool;
}

/// Thread-safe running/stopped flag.
#[derive(Debug, Default)]
pub struct State {
    running: AtomicBool,
}

impl State {
    /// Create a state in the stopped position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Transition stopped -> running.
    pub fn set_running(&self) -> Result<()> {
        self.set_state(true)
    }

    /// Transition running -> stopped.
    pub fn set_stopped(&self) -> Result<()> {
        self.set_state(false)
    }

    /// Swap in `running`, failing if the state already had that value.
    ///
    /// A failed transition leaves the state untouched.
    pub fn set_state(&self, running: bool) -> Result<()> {
        let previous = self.running.swap(running, Ordering::SeqCst);
        if previous == running {
            return Err(Error::AlreadyInState { running });
        }
        Ok(())
    }

    #[must_use]
    pub fn running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Block until `service.running()` equals `running`, or fail after `timeout`.
pub fn wait_until<S: Service + ?Sized>(service: &S, running: bool, timeout: Duration) -> Result<()> {
    let start = Instant::now();
    while service.running() != running {
        thread::sleep(POLL_INTERVAL);
        if start.elapsed() >= timeout {
            return Err(Error::Timeout { running, timeout });
        }
    }
    Ok(())
}

/// Block until the service reports running.
pub fn wait_until_running<S: Service + ?Sized>(service: &S, timeout: Duration) -> Result<()> {
    wait_until(service, true, timeout)
}

/// Block until the service reports stopped.
pub fn wait_until_stopped<S: Service + ?Sized>(service: &S, timeout: Duration) -> Result<()> {
    wait_until(service, false, timeout)
}
