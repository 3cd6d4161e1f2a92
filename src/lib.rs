// Event Countdown Library
// Countdown state machine, celebration timer and confetti engine

pub mod models;
pub mod services;
pub mod utils;

pub use models::countdown::{
    CountdownPhase, CountdownSnapshot, CountdownState, PendingReason, PhaseThresholds,
    TimeBreakdown,
};
pub use models::particle::{MotionParams, Particle, ParticleFrame, RegenerationPolicy, Viewport};
pub use models::settings::{PresentationMode, Settings};
pub use models::target_date::{parse_date_input, DateError, TargetDate};
pub use services::clock::{ClockSource, ManualClock, SystemClock};
pub use services::countdown::{
    CelebrationTimer, CelebrationWindow, Countdown, CountdownConfig, CountdownEngine,
};
pub use services::particles::{ParticleConfig, ParticleSystem};
pub use services::pulse::{FrameClock, PulseAnimator, Waveform};
