// Property-based tests for the confetti engine
// Seeded populations are reproducible and frames stay within their bounds

use event_countdown::services::particles::{generate_population, particle_frame};
use event_countdown::{MotionParams, ParticleConfig, ParticleSystem, RegenerationPolicy, Viewport};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;

fn seeded(seed: u64, count: usize) -> ParticleSystem {
    ParticleSystem::new(ParticleConfig {
        count,
        seed: Some(seed),
        policy: RegenerationPolicy::PerActivation,
        ..ParticleConfig::default()
    })
}

proptest! {
    /// Property: the same seed always yields the same population
    #[test]
    fn prop_seeded_populations_repeat(seed in any::<u64>(), count in 1..300usize) {
        let mut first = seeded(seed, count);
        let mut second = seeded(seed, count);
        prop_assert_eq!(first.activate().to_vec(), second.activate().to_vec());
    }

    /// Property: particle attributes stay in their unit ranges
    #[test]
    fn prop_attributes_in_range(seed in any::<u64>(), palette in 1..16usize) {
        let mut rng = Pcg64::seed_from_u64(seed);
        for p in generate_population(&mut rng, 64, palette) {
            prop_assert!((0.0..1.0).contains(&p.horizontal_factor));
            prop_assert!((0.0..1.0).contains(&p.depth));
            prop_assert!((0.0..1.0).contains(&p.vertical_offset));
            prop_assert!(p.color_index < palette);
        }
    }

    /// Property: frames are sized by depth and never drift far off screen
    #[test]
    fn prop_frames_are_bounded(
        seed in any::<u64>(),
        fall in -0.2f32..1.2,
        rotation in 0.0f32..360.0,
        width in 100.0f32..2000.0,
        height in 100.0f32..2000.0,
    ) {
        let params = MotionParams::default();
        let viewport = Viewport::new(width, height);
        let mut rng = Pcg64::seed_from_u64(seed);

        for p in generate_population(&mut rng, 32, 7) {
            let frame = particle_frame(&p, fall, rotation, viewport, &params);
            let max_drift = params.drift_base + params.drift_spread;

            prop_assert!(frame.size >= params.base_size);
            prop_assert!(frame.size <= params.base_size + params.size_spread);
            prop_assert!(frame.x >= -max_drift && frame.x <= width + max_drift);
            prop_assert!(frame.y >= -params.parallax_offset);
            prop_assert!(frame.y <= params.wrap_period * height);
            prop_assert_eq!(frame.color_index, p.color_index);
        }
    }

    /// Property: a frame depends only on its inputs
    #[test]
    fn prop_frames_are_pure(seed in any::<u64>(), fall in -0.2f32..1.2) {
        let mut system = seeded(seed, 50);
        system.activate();
        let viewport = Viewport::new(800.0, 600.0);
        prop_assert_eq!(system.frame(fall, 90.0, viewport), system.frame(fall, 90.0, viewport));
    }
}
