//! User-tunable settings.
//!
//! Every section defaults to the stock behaviour, so an empty or partial
//! `settings.toml` is always valid input.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::countdown::PhaseThresholds;
use super::particle::{MotionParams, RegenerationPolicy};

pub const DEFAULT_CELEBRATION_MS: u64 = 8_000;
pub const DEFAULT_CELEBRATION_TEXT: &str = "🎉 Event is happening!";
pub const DEFAULT_PARTICLE_COUNT: usize = 120;
pub const DEFAULT_FALL_PERIOD_MS: u64 = 3_500;
pub const DEFAULT_ROTATION_PERIOD_MS: u64 = 2_400;

/// Light or dark presentation. Only affects colour choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    Light,
    Dark,
}

impl Default for PresentationMode {
    fn default() -> Self {
        Self::Light
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub countdown: PhaseThresholds,
    pub celebration: CelebrationSettings,
    pub particles: ParticleSettings,
    pub presentation: PresentationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationSettings {
    pub duration_ms: u64,
    pub text: String,
}

impl Default for CelebrationSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_CELEBRATION_MS,
            text: DEFAULT_CELEBRATION_TEXT.to_string(),
        }
    }
}

impl CelebrationSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub count: usize,
    pub fall_period_ms: u64,
    pub rotation_period_ms: u64,
    pub regeneration: RegenerationPolicy,
    /// Fixed seed for reproducible confetti; random when absent
    pub seed: Option<u64>,
    pub motion: MotionParams,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            fall_period_ms: DEFAULT_FALL_PERIOD_MS,
            rotation_period_ms: DEFAULT_ROTATION_PERIOD_MS,
            regeneration: RegenerationPolicy::default(),
            seed: None,
            motion: MotionParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PresentationSettings {
    pub mode: PresentationMode,
}

/// Validation errors for Settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsValidationError {
    #[error("countdown thresholds must satisfy 0 < last_hour_ms < last_day_ms")]
    InvalidThresholds,
    #[error("celebration duration must be greater than zero")]
    ZeroCelebrationDuration,
    #[error("particle count must be greater than zero")]
    NoParticles,
    #[error("{0} period must be greater than zero")]
    ZeroPeriod(&'static str),
    #[error("motion wrap period must be a positive number")]
    InvalidWrapPeriod,
}

impl Settings {
    /// Validate the settings data.
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if !self.countdown.is_valid() {
            return Err(SettingsValidationError::InvalidThresholds);
        }
        if self.celebration.duration_ms == 0 {
            return Err(SettingsValidationError::ZeroCelebrationDuration);
        }
        if self.particles.count == 0 {
            return Err(SettingsValidationError::NoParticles);
        }
        if self.particles.fall_period_ms == 0 {
            return Err(SettingsValidationError::ZeroPeriod("fall"));
        }
        if self.particles.rotation_period_ms == 0 {
            return Err(SettingsValidationError::ZeroPeriod("rotation"));
        }
        let wrap = self.particles.motion.wrap_period;
        if !(wrap.is_finite() && wrap > 0.0) {
            return Err(SettingsValidationError::InvalidWrapPeriod);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [celebration]
            duration_ms = 5000

            [particles]
            count = 40
            regeneration = "per_session"

            [presentation]
            mode = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(settings.celebration.duration_ms, 5000);
        assert_eq!(settings.celebration.text, DEFAULT_CELEBRATION_TEXT);
        assert_eq!(settings.particles.count, 40);
        assert_eq!(settings.particles.regeneration, RegenerationPolicy::PerSession);
        assert_eq!(settings.particles.fall_period_ms, DEFAULT_FALL_PERIOD_MS);
        assert_eq!(settings.presentation.mode, PresentationMode::Dark);
        assert_eq!(settings.countdown, PhaseThresholds::default());
    }

    #[test]
    fn test_rejects_zero_particles() {
        let mut settings = Settings::default();
        settings.particles.count = 0;
        assert_eq!(settings.validate(), Err(SettingsValidationError::NoParticles));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut settings = Settings::default();
        settings.countdown.last_hour_ms = settings.countdown.last_day_ms;
        assert_eq!(
            settings.validate(),
            Err(SettingsValidationError::InvalidThresholds)
        );
    }

    #[test]
    fn test_rejects_zero_periods() {
        let mut settings = Settings::default();
        settings.particles.rotation_period_ms = 0;
        assert_eq!(
            settings.validate(),
            Err(SettingsValidationError::ZeroPeriod("rotation"))
        );

        let mut settings = Settings::default();
        settings.celebration.duration_ms = 0;
        assert_eq!(
            settings.validate(),
            Err(SettingsValidationError::ZeroCelebrationDuration)
        );
    }
}
