//! # Debounced Scheduling
//!
//! Cancel-then-reschedule execution for bursty input.
//!
//! ## Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  keystroke "1"    ──► schedule(recalc)   timer armed (400ms)            │
//! │  keystroke "10"   ──► schedule(recalc)   previous timer ABORTED,        │
//! │  keystroke "100"  ──► schedule(recalc)   new one armed                  │
//! │       ...400ms of silence...                                            │
//! │                       recalc runs ONCE, for "100"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the trailing edge fires. A burst of N schedules runs the task at
//! most once, after the configured quiet interval.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Schedules a task to run after a quiet interval, cancelling any
/// previously scheduled run.
///
/// Dropping the debouncer cancels the pending task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet interval.
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `task` to run after the quiet interval.
    ///
    /// Any previously scheduled task that has not fired yet is aborted
    /// first. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let mut pending = self.pending.lock().expect("debounce mutex poisoned");
        if let Some(previous) = pending.replace(handle) {
            trace!("debounce: aborting superseded task");
            previous.abort();
        }
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().expect("debounce mutex poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled task has not completed or been cancelled yet.
    pub fn has_pending(&self) -> bool {
        let pending = self.pending.lock().expect("debounce mutex poisoned");
        pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
