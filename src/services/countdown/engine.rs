//! Countdown state machine.
//!
//! Pure evaluation of the phase and remaining time for a target day at a
//! given instant. Scheduling lives in [`super::runner`].

use std::time::Duration as StdDuration;

use chrono::{DateTime, Local};

use crate::models::countdown::{CountdownState, PhaseThresholds};
use crate::models::target_date::TargetDate;
use crate::utils::date::millis_to_next_second;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountdownEngine {
    target: Option<TargetDate>,
    thresholds: PhaseThresholds,
}

impl CountdownEngine {
    pub fn new(target: Option<TargetDate>, thresholds: PhaseThresholds) -> Self {
        Self { target, thresholds }
    }

    /// Computes the state at `now`.
    ///
    /// The event day is detected by calendar date as well as by the
    /// millisecond difference, so starting mid-day on the target date or a
    /// clock that stepped backwards still lands in `EventDay`.
    pub fn evaluate(&self, now: DateTime<Local>) -> CountdownState {
        let Some(target) = self.target else {
            return CountdownState::pending();
        };

        if target.is_today(now) {
            return CountdownState {
                phase: self.thresholds.classify(0),
                remaining_ms: Some(0),
            };
        }

        let diff_ms = target
            .local_midnight()
            .signed_duration_since(now)
            .num_milliseconds();
        let remaining_ms = diff_ms.max(0) as u64;

        CountdownState {
            phase: self.thresholds.classify(remaining_ms),
            remaining_ms: Some(remaining_ms),
        }
    }

    /// Delay until the next tick, aligned to the next wall-clock second so
    /// successive ticks do not accumulate scheduling drift.
    pub fn next_tick_delay(now: DateTime<Local>) -> StdDuration {
        StdDuration::from_millis(millis_to_next_second(now))
    }
}
