//! Celebration window and its auto-close timer.
//!
//! Entering the event day opens the window; a single deferred close fires
//! `duration` later. Opening again while open restarts that timer. Every open
//! bumps an epoch so a close that was already past its sleep when the window
//! was re-opened cannot shut the new window.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Visibility state of the celebration animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationWindow {
    active: bool,
    opened_at: Option<DateTime<Local>>,
    duration: StdDuration,
}

impl CelebrationWindow {
    pub fn new(duration: StdDuration) -> Self {
        Self {
            active: false,
            opened_at: None,
            duration,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn opened_at(&self) -> Option<DateTime<Local>> {
        self.opened_at
    }

    pub fn duration(&self) -> StdDuration {
        self.duration
    }

    /// Opens (or re-opens) the window at `now`.
    pub fn open(&mut self, now: DateTime<Local>) {
        self.active = true;
        self.opened_at = Some(now);
    }

    /// Closes the window. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Wall-clock instant at which an open window is due to close.
    pub fn closes_at(&self) -> Option<DateTime<Local>> {
        if !self.active {
            return None;
        }
        let duration = Duration::from_std(self.duration).ok()?;
        self.opened_at.map(|opened| opened + duration)
    }

    /// Frame-driven visibility check for hosts that poll instead of
    /// subscribing.
    pub fn is_open_at(&self, now: DateTime<Local>) -> bool {
        match (self.opened_at, self.closes_at()) {
            (Some(opened), Some(closes)) => now >= opened && now < closes,
            _ => false,
        }
    }
}

struct TimerState {
    window: CelebrationWindow,
    epoch: u64,
    close_task: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<TimerState>,
    active_tx: watch::Sender<bool>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn close_if_current(&self, epoch: u64) {
        let mut state = self.lock();
        if state.epoch != epoch {
            return;
        }
        state.close_task = None;
        if state.window.close() {
            log::info!(
                "Celebration window closed after {} ms",
                state.window.duration().as_millis()
            );
            self.active_tx.send_replace(false);
        }
    }
}

/// Owns a [`CelebrationWindow`] and the task that closes it.
///
/// Must be opened from within a tokio runtime.
pub struct CelebrationTimer {
    shared: Arc<Shared>,
}

impl CelebrationTimer {
    pub fn new(duration: StdDuration) -> Self {
        let (active_tx, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(TimerState {
                    window: CelebrationWindow::new(duration),
                    epoch: 0,
                    close_task: None,
                }),
                active_tx,
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.shared.lock().window.is_active()
    }

    pub fn window(&self) -> CelebrationWindow {
        self.shared.lock().window
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.active_tx.subscribe()
    }

    /// Opens the window at `now` and (re)starts the close timer.
    pub fn open(&self, now: DateTime<Local>) {
        let mut state = self.shared.lock();
        state.epoch += 1;
        let epoch = state.epoch;
        if let Some(task) = state.close_task.take() {
            task.abort();
        }

        let reopened = state.window.is_active();
        state.window.open(now);
        let duration = state.window.duration();
        if reopened {
            log::info!("Celebration window re-opened; close timer restarted");
        } else {
            log::info!("Celebration window opened for {} ms", duration.as_millis());
        }
        // Re-opening keeps the flag up without a spurious notification.
        self.shared.active_tx.send_if_modified(|active| !std::mem::replace(active, true));

        let shared = Arc::clone(&self.shared);
        state.close_task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            shared.close_if_current(epoch);
        }));
    }

    /// Cancels the pending close without touching visibility. The caller is
    /// expected to follow up with [`open`](Self::open) or
    /// [`close`](Self::close).
    pub fn cancel_close(&self) {
        let mut state = self.shared.lock();
        state.epoch += 1;
        if let Some(task) = state.close_task.take() {
            task.abort();
        }
    }

    /// Closes the window now and cancels any pending close. Idempotent.
    pub fn close(&self) {
        let mut state = self.shared.lock();
        state.epoch += 1;
        if let Some(task) = state.close_task.take() {
            task.abort();
        }
        if state.window.close() {
            log::debug!("Celebration window closed early");
            self.shared.active_tx.send_replace(false);
        }
    }
}

impl Drop for CelebrationTimer {
    fn drop(&mut self) {
        if let Some(task) = self.shared.lock().close_task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for CelebrationTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CelebrationTimer")
            .field("window", &self.window())
            .finish()
    }
}
