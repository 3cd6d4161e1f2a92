//! The countdown tick loop.
//!
//! A [`Countdown`] owns at most one running tick task. Selecting a new date
//! cancels the celebration close timer, aborts that task and waits for it to
//! finish. The first tick of the new target is evaluated in place, and a loop
//! is spawned for later ticks only when the event day has not arrived. Each
//! loop carries the generation it was started for and stops publishing once
//! it is stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Local};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use super::celebration::{CelebrationTimer, CelebrationWindow};
use super::engine::CountdownEngine;
use crate::models::countdown::{
    CountdownPhase, CountdownSnapshot, CountdownState, PendingReason, PhaseThresholds,
};
use crate::models::settings::{Settings, DEFAULT_CELEBRATION_MS};
use crate::models::target_date::{parse_date_input, DateError, TargetDate};
use crate::services::clock::ClockSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownConfig {
    pub thresholds: PhaseThresholds,
    pub celebration_duration: StdDuration,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            thresholds: PhaseThresholds::default(),
            celebration_duration: StdDuration::from_millis(DEFAULT_CELEBRATION_MS),
        }
    }
}

impl From<&Settings> for CountdownConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            thresholds: settings.countdown,
            celebration_duration: settings.celebration.duration(),
        }
    }
}

/// Everything a tick task needs, cloned into it on spawn.
#[derive(Clone)]
struct TickContext {
    clock: Arc<dyn ClockSource>,
    thresholds: PhaseThresholds,
    celebration: Arc<CelebrationTimer>,
    state_tx: Arc<watch::Sender<CountdownSnapshot>>,
    generation: Arc<AtomicU64>,
}

impl TickContext {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Publishes `state`, opening the celebration first on the event day so
    /// observers of `EventDay` also see the celebration as active.
    fn publish(
        &self,
        target: TargetDate,
        state: CountdownState,
        now: DateTime<Local>,
        last_phase: &mut Option<CountdownPhase>,
    ) {
        if *last_phase != Some(state.phase) {
            log::info!(
                "Countdown to {} is now {:?} ({} ms remaining)",
                target,
                state.phase,
                state.remaining_ms.unwrap_or(0)
            );
            *last_phase = Some(state.phase);
        }

        if state.is_event_day() {
            self.celebration.open(now);
        }
        self.state_tx
            .send_replace(CountdownSnapshot::from_state(target, state));
    }

    async fn run(
        self,
        target: TargetDate,
        generation: u64,
        mut last_phase: Option<CountdownPhase>,
        mut delay: StdDuration,
    ) {
        let engine = CountdownEngine::new(Some(target), self.thresholds);

        loop {
            tokio::time::sleep(delay).await;

            let now = self.clock.now();
            let state = engine.evaluate(now);

            if !self.is_current(generation) {
                log::debug!("Dropping stale tick for {target}");
                return;
            }

            self.publish(target, state, now, &mut last_phase);
            if state.is_event_day() {
                log::debug!("Tick loop for {target} finished");
                return;
            }

            delay = CountdownEngine::next_tick_delay(now);
        }
    }
}

enum NextRun {
    Pending(PendingReason),
    Tick(TargetDate),
    Stopped,
}

/// A single countdown instance.
pub struct Countdown {
    ctx: TickContext,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Countdown {
    pub fn new(clock: Arc<dyn ClockSource>, config: CountdownConfig) -> Self {
        let (state_tx, _) = watch::channel(CountdownSnapshot::pending(PendingReason::NoTarget));
        Self {
            ctx: TickContext {
                clock,
                thresholds: config.thresholds,
                celebration: Arc::new(CelebrationTimer::new(config.celebration_duration)),
                state_tx: Arc::new(state_tx),
                generation: Arc::new(AtomicU64::new(0)),
            },
            task: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.ctx.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        self.ctx.state_tx.borrow().clone()
    }

    pub fn subscribe_celebration(&self) -> watch::Receiver<bool> {
        self.ctx.celebration.subscribe()
    }

    pub fn celebration_active(&self) -> bool {
        self.ctx.celebration.is_active()
    }

    pub fn celebration_window(&self) -> CelebrationWindow {
        self.ctx.celebration.window()
    }

    /// Applies a `dd-mm-yyyy` selection from the date picker.
    ///
    /// Empty input clears the target. Invalid input also leaves the
    /// countdown pending and is returned as the error.
    pub async fn select_date(&self, input: &str) -> Result<Option<TargetDate>, DateError> {
        match parse_date_input(input) {
            Ok(target) => {
                self.set_target(target).await;
                Ok(target)
            }
            Err(err) => {
                log::warn!("Ignoring date selection: {err}");
                self.restart(NextRun::Pending(PendingReason::InvalidDate))
                    .await;
                Err(err)
            }
        }
    }

    /// Replaces the target, cancelling any running loop first.
    pub async fn set_target(&self, target: Option<TargetDate>) {
        let next = match target {
            Some(target) => NextRun::Tick(target),
            None => NextRun::Pending(PendingReason::NoTarget),
        };
        self.restart(next).await;
    }

    /// Stops the tick loop and the celebration timer for good.
    pub async fn shutdown(&self) {
        self.restart(NextRun::Stopped).await;
    }

    async fn restart(&self, next: NextRun) {
        let mut task = self.task.lock().await;
        let generation = self.ctx.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.ctx.celebration.cancel_close();

        if let Some(handle) = task.take() {
            handle.abort();
            // Cancellation surfaces as a JoinError; either way the loop is gone.
            let _ = handle.await;
        }

        match next {
            NextRun::Pending(reason) => {
                log::info!("Countdown pending: {reason:?}");
                self.ctx.celebration.close();
                self.ctx
                    .state_tx
                    .send_replace(CountdownSnapshot::pending(reason));
            }
            NextRun::Tick(target) => {
                log::info!("Starting countdown to {target}");
                // The first tick runs here so the snapshot and the celebration
                // flag are both settled when the selection returns.
                let now = self.ctx.clock.now();
                let state = CountdownEngine::new(Some(target), self.ctx.thresholds).evaluate(now);
                if !state.is_event_day() {
                    self.ctx.celebration.close();
                }

                let mut last_phase = None;
                self.ctx.publish(target, state, now, &mut last_phase);
                if !state.is_event_day() {
                    let ctx = self.ctx.clone();
                    let delay = CountdownEngine::next_tick_delay(now);
                    *task = Some(tokio::spawn(ctx.run(target, generation, last_phase, delay)));
                }
            }
            NextRun::Stopped => {
                log::debug!("Countdown stopped");
                self.ctx.celebration.close();
            }
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.ctx.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
        self.ctx.celebration.close();
    }
}
