//! Wall-clock sources.
//!
//! The countdown never calls `Local::now()` directly; it asks a
//! [`ClockSource`]. Production code uses [`SystemClock`]. [`ManualClock`]
//! reads a fixed starting instant plus the runtime's monotonic elapsed time,
//! so under a paused tokio clock the wall reading moves exactly as far as the
//! tick loop sleeps. It can also be set or shifted to simulate skew.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local};
use tokio::time::Instant;

#[cfg_attr(test, mockall::automock)]
pub trait ClockSource: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[derive(Debug)]
struct ManualReading {
    base: DateTime<Local>,
    anchor: Instant,
}

/// Controllable clock for tests and simulations.
#[derive(Debug)]
pub struct ManualClock {
    reading: Mutex<ManualReading>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            reading: Mutex::new(ManualReading {
                base: start,
                anchor: Instant::now(),
            }),
        }
    }

    /// Jumps the wall reading to `at`; it keeps advancing from there.
    pub fn set(&self, at: DateTime<Local>) {
        let mut reading = self.lock();
        reading.base = at;
        reading.anchor = Instant::now();
    }

    /// Moves the wall reading by `delta`, negative to simulate a clock
    /// stepping backwards.
    pub fn shift(&self, delta: Duration) {
        let mut reading = self.lock();
        reading.base += delta;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualReading> {
        // A poisoned reading is still a valid instant.
        self.reading.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> DateTime<Local> {
        let reading = self.lock();
        let elapsed = Instant::now().saturating_duration_since(reading.anchor);
        let elapsed = Duration::from_std(elapsed).unwrap_or_else(|_| Duration::zero());
        reading.base + elapsed
    }
}
