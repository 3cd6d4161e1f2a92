//! Confetti particle system.
//!
//! Owns the particle population and decides when it is (re)generated. Frame
//! computation is delegated to the pure functions in [`motion`]; the system
//! keeps no per-frame state of its own.

mod motion;
mod population;

pub use motion::{particle_frame, population_frames};
pub use population::generate_population;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::models::particle::{MotionParams, Particle, ParticleFrame, RegenerationPolicy, Viewport};
use crate::models::settings::{ParticleSettings, DEFAULT_PARTICLE_COUNT};

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub palette_size: usize,
    pub policy: RegenerationPolicy,
    pub seed: Option<u64>,
    pub motion: MotionParams,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            palette_size: 7,
            policy: RegenerationPolicy::default(),
            seed: None,
            motion: MotionParams::default(),
        }
    }
}

impl ParticleConfig {
    pub fn from_settings(settings: &ParticleSettings, palette_size: usize) -> Self {
        Self {
            count: settings.count,
            palette_size,
            policy: settings.regeneration,
            seed: settings.seed,
            motion: settings.motion,
        }
    }
}

#[derive(Debug)]
pub struct ParticleSystem {
    config: ParticleConfig,
    rng: Pcg64,
    population: Option<Vec<Particle>>,
    visible: bool,
    generations: u64,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        Self {
            config,
            rng,
            population: None,
            visible: false,
            generations: 0,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// How many populations have been generated so far.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Current population, if one has been generated.
    pub fn population(&self) -> Option<&[Particle]> {
        self.population.as_deref()
    }

    /// Makes the confetti visible, generating a population as the policy
    /// requires. Activating while already visible keeps the population.
    pub fn activate(&mut self) -> &[Particle] {
        let regenerate = match (self.visible, self.config.policy) {
            (true, _) => self.population.is_none(),
            (false, RegenerationPolicy::PerActivation) => true,
            (false, RegenerationPolicy::PerSession) => self.population.is_none(),
        };
        if regenerate {
            let palette_size = self.config.palette_size.max(1);
            let particles = generate_population(&mut self.rng, self.config.count, palette_size);
            self.generations += 1;
            log::debug!(
                "Generated {} confetti particles (generation {})",
                particles.len(),
                self.generations
            );
            self.population = Some(particles);
        }
        self.visible = true;
        self.population.as_deref().unwrap_or(&[])
    }

    pub fn deactivate(&mut self) {
        self.visible = false;
    }

    /// Follows the celebration flag: activates on the rising edge and hides
    /// on the falling edge. Returns the population while visible.
    pub fn sync(&mut self, celebration_active: bool) -> Option<&[Particle]> {
        if celebration_active && !self.visible {
            self.activate();
        } else if !celebration_active && self.visible {
            self.deactivate();
        }
        if self.visible {
            self.population()
        } else {
            None
        }
    }

    /// Frames for the current population. Empty while hidden. The viewport
    /// is taken per call and never cached.
    pub fn frame(
        &self,
        fall_progress: f32,
        rotation_progress: f32,
        viewport: Viewport,
    ) -> Vec<ParticleFrame> {
        match (self.visible, self.population()) {
            (true, Some(particles)) => population_frames(
                particles,
                fall_progress,
                rotation_progress,
                viewport,
                &self.config.motion,
            ),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(policy: RegenerationPolicy) -> ParticleConfig {
        ParticleConfig {
            count: 100,
            palette_size: 7,
            policy,
            seed: Some(99),
            motion: MotionParams::default(),
        }
    }

    #[test]
    fn test_population_stable_within_activation() {
        let mut system = ParticleSystem::new(config(RegenerationPolicy::PerActivation));
        let first = system.activate().to_vec();
        assert_eq!(first.len(), 100);

        // Frames never regenerate.
        let viewport = Viewport::new(320.0, 640.0);
        let frame_a = system.frame(0.1, 10.0, viewport);
        let frame_b = system.frame(0.1, 10.0, viewport);
        assert_eq!(frame_a, frame_b);
        assert_eq!(system.population().unwrap(), first.as_slice());

        system.activate();
        assert_eq!(system.generations(), 1);
    }

    #[test]
    fn test_per_activation_regenerates() {
        let mut system = ParticleSystem::new(config(RegenerationPolicy::PerActivation));
        let first = system.activate().to_vec();
        system.deactivate();
        let second = system.activate().to_vec();
        assert_ne!(first, second);
        assert_eq!(system.generations(), 2);
    }

    #[test]
    fn test_per_session_keeps_population() {
        let mut system = ParticleSystem::new(config(RegenerationPolicy::PerSession));
        let first = system.activate().to_vec();
        system.deactivate();
        let second = system.activate().to_vec();
        assert_eq!(first, second);
        assert_eq!(system.generations(), 1);
    }

    #[test]
    fn test_sync_follows_celebration_edges() {
        let mut system = ParticleSystem::new(config(RegenerationPolicy::PerActivation));
        assert!(system.sync(false).is_none());
        assert_eq!(system.sync(true).map(|p| p.len()), Some(100));
        assert_eq!(system.sync(true).map(|p| p.len()), Some(100));
        assert_eq!(system.generations(), 1);
        assert!(system.sync(false).is_none());
        assert!(system.frame(0.0, 0.0, Viewport::new(10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_hidden_system_draws_nothing() {
        let system = ParticleSystem::new(config(RegenerationPolicy::PerActivation));
        assert!(system.frame(0.5, 0.0, Viewport::new(100.0, 100.0)).is_empty());
        assert!(system.population().is_none());
    }
}
