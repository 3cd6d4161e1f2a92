//! Per-frame particle placement.
//!
//! Pure functions: the same particle, progress values and viewport always
//! yield the same frame. Deeper particles are drawn larger, drift further and
//! start higher above the viewport, which reads as depth of field.

use crate::models::particle::{MotionParams, Particle, ParticleFrame, Viewport};

pub fn particle_frame(
    particle: &Particle,
    fall_progress: f32,
    rotation_progress: f32,
    viewport: Viewport,
    params: &MotionParams,
) -> ParticleFrame {
    let depth = particle.depth;

    let size = params.base_size + depth * params.size_spread;
    let drift = (fall_progress * params.drift_frequency + depth * params.phase_spread).sin()
        * (params.drift_base + depth * params.drift_spread);

    // Per-particle offsets stagger the wrap so the population never resets
    // in unison.
    let cycle = (fall_progress + particle.vertical_offset).rem_euclid(params.wrap_period);
    let y = cycle * viewport.height - depth * params.parallax_offset;
    let x = particle.horizontal_factor * viewport.width + drift;

    ParticleFrame {
        x,
        y,
        size,
        rotation: rotation_progress + depth * params.rotation_spread,
        color_index: particle.color_index,
    }
}

/// Frames for a whole population, in population order.
pub fn population_frames(
    particles: &[Particle],
    fall_progress: f32,
    rotation_progress: f32,
    viewport: Viewport,
    params: &MotionParams,
) -> Vec<ParticleFrame> {
    particles
        .iter()
        .map(|p| particle_frame(p, fall_progress, rotation_progress, viewport, params))
        .collect()
}
