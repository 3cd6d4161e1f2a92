//! Periodic progress generators for frame-driven animation.
//!
//! A [`PulseAnimator`] maps elapsed time onto a value that repeats every
//! `period`. Evaluation is a pure function of elapsed time, so pausing and
//! resuming the frame clock never produces a jump.

use std::f32::consts::TAU;
use std::time::{Duration, Instant};

/// Shape of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Linear `from -> to`, then restart
    Sawtooth,
    /// Linear `from -> to -> from`
    Triangle,
    /// Eased `from -> to -> from`
    Sine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseAnimator {
    from: f32,
    to: f32,
    period: Duration,
    waveform: Waveform,
}

impl PulseAnimator {
    pub fn new(from: f32, to: f32, period: Duration, waveform: Waveform) -> Self {
        Self {
            from,
            to,
            period,
            waveform,
        }
    }

    /// Confetti fall progress over `[-0.2, 1.2)`.
    pub fn fall_progress(period: Duration) -> Self {
        Self::new(-0.2, 1.2, period, Waveform::Sawtooth)
    }

    /// Rotation in degrees over `[0, 360)`.
    pub fn rotation_progress(period: Duration) -> Self {
        Self::new(0.0, 360.0, period, Waveform::Sawtooth)
    }

    /// Text scale pulse: 1.0 up to 1.12 in 900 ms and back.
    pub fn urgency_pulse() -> Self {
        Self::new(1.0, 1.12, Duration::from_millis(1_800), Waveform::Triangle)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Position within the current cycle, in `[0, 1)`.
    pub fn phase_at(&self, elapsed: Duration) -> f32 {
        let period = self.period.as_nanos();
        if period == 0 {
            return 0.0;
        }
        (elapsed.as_nanos() % period) as f32 / period as f32
    }

    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let t = self.phase_at(elapsed);
        let weight = match self.waveform {
            Waveform::Sawtooth => t,
            Waveform::Triangle => 1.0 - (2.0 * t - 1.0).abs(),
            Waveform::Sine => 0.5 - 0.5 * (TAU * t).cos(),
        };
        self.from + (self.to - self.from) * weight
    }
}

/// Continuous frame clock, independent of the countdown tick loop.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}
