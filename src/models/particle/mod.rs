//! Confetti particle model.
//!
//! A particle only carries its randomized attributes. Where it is drawn on a
//! given frame is derived from those attributes and the animation progress,
//! see `services::particles::motion`.

use serde::{Deserialize, Serialize};

/// Stable per-particle attributes, all fixed at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Horizontal placement as a fraction of the viewport width, in [0, 1)
    pub horizontal_factor: f32,
    /// Simulated distance from the viewer, in [0, 1); larger is closer
    pub depth: f32,
    /// Index into the host palette
    pub color_index: usize,
    /// Phase offset of the fall cycle, in [0, 1)
    pub vertical_offset: f32,
}

/// Where and how to draw one particle on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleFrame {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Degrees
    pub rotation: f32,
    pub color_index: usize,
}

/// Drawing surface supplied by the host every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Tunables of the per-frame motion function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub base_size: f32,
    pub size_spread: f32,
    pub drift_frequency: f32,
    pub phase_spread: f32,
    pub drift_base: f32,
    pub drift_spread: f32,
    /// Length of one fall cycle in progress units
    pub wrap_period: f32,
    /// How far above the viewport the deepest particles start, in pixels
    pub parallax_offset: f32,
    /// Extra rotation applied at full depth, in degrees
    pub rotation_spread: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            base_size: 6.0,
            size_spread: 14.0,
            drift_frequency: 10.0,
            phase_spread: 5.0,
            drift_base: 20.0,
            drift_spread: 20.0,
            wrap_period: 1.4,
            parallax_offset: 600.0,
            rotation_spread: 180.0,
        }
    }
}

/// When a particle population is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationPolicy {
    /// Fresh population every time a celebration opens
    PerActivation,
    /// One population for the lifetime of the particle system
    PerSession,
}

impl Default for RegenerationPolicy {
    fn default() -> Self {
        Self::PerActivation
    }
}
