mod celebration;
mod engine;
mod runner;

pub use celebration::{CelebrationTimer, CelebrationWindow};
pub use engine::CountdownEngine;
pub use runner::{Countdown, CountdownConfig};
