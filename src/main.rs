// Event Countdown
// Main entry point

mod terminal;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::MissedTickBehavior;

use event_countdown::models::settings::PresentationMode;
use event_countdown::services::clock::SystemClock;
use event_countdown::services::countdown::{Countdown, CountdownConfig};
use event_countdown::services::particles::{ParticleConfig, ParticleSystem};
use event_countdown::services::presentation::{confetti_palette, text_scale};
use event_countdown::services::pulse::{FrameClock, PulseAnimator};
use event_countdown::services::settings::SettingsService;
use event_countdown::{CountdownPhase, DateError, TargetDate};

use terminal::TerminalRenderer;

#[derive(Parser, Debug)]
#[command(name = "event-countdown", version, about = "Count down to a date, then celebrate")]
struct Cli {
    /// Target date in dd-mm-yyyy format
    date: Option<String>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use dark-mode colours
    #[arg(long)]
    dark: bool,

    /// Seed for reproducible confetti
    #[arg(long)]
    seed: Option<u64>,

    /// Confetti frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Confetti area width in columns
    #[arg(long, default_value_t = 60)]
    width: u16,

    /// Confetti area height in rows
    #[arg(long, default_value_t = 20)]
    height: u16,

    /// Print each snapshot as a JSON line instead of drawing
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let settings_service = match &cli.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::at_default_location(),
    };
    let mut settings = settings_service.get()?;
    if cli.dark {
        settings.presentation.mode = PresentationMode::Dark;
    }
    if cli.seed.is_some() {
        settings.particles.seed = cli.seed;
    }

    log::info!("Starting Event Countdown");

    let countdown = Countdown::new(Arc::new(SystemClock), CountdownConfig::from(&settings));
    let mut states = countdown.subscribe();
    let mut celebration = countdown.subscribe_celebration();

    let selection = countdown.select_date(cli.date.as_deref().unwrap_or("")).await;
    if selected_target(selection)?.is_none() {
        println!("Select Date: pass a target date as dd-mm-yyyy");
        return Ok(());
    }

    let mode = settings.presentation.mode;
    let palette = confetti_palette(mode);
    let mut particles = ParticleSystem::new(ParticleConfig::from_settings(
        &settings.particles,
        palette.len(),
    ));
    let mut renderer = TerminalRenderer::new(
        cli.width,
        cli.height,
        palette,
        mode,
        settings.celebration.text.clone(),
    );

    let fall_period = Duration::from_millis(settings.particles.fall_period_ms);
    let rotation_period = Duration::from_millis(settings.particles.rotation_period_ms);
    let fall = PulseAnimator::fall_progress(fall_period);
    let rotation = PulseAnimator::rotation_progress(rotation_period);
    let frame_clock = FrameClock::start();
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(cli.fps.max(1)));
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut celebrated = false;

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = states.borrow_and_update().clone();
                if cli.json {
                    println!("{}", serde_json::to_string(&snapshot)?);
                } else if !particles.is_visible() {
                    renderer.print_status(&snapshot)?;
                }
            }
            changed = celebration.changed() => {
                if changed.is_err() {
                    break;
                }
                let active = *celebration.borrow_and_update();
                particles.sync(active);
                if active {
                    celebrated = true;
                } else if celebrated {
                    break;
                }
            }
            _ = frames.tick(), if particles.is_visible() && !cli.json => {
                let elapsed = frame_clock.elapsed();
                let frame = particles.frame(
                    fall.value_at(elapsed),
                    rotation.value_at(elapsed),
                    renderer.viewport(),
                );
                renderer.draw_confetti(&frame, text_scale(CountdownPhase::EventDay, elapsed))?;
            }
            _ = &mut ctrl_c => {
                log::info!("Interrupted");
                break;
            }
        }
    }

    countdown.shutdown().await;
    renderer.finish()?;
    Ok(())
}

/// A rejected date ends the run with an error so the exit status reflects it.
fn selected_target(
    selection: std::result::Result<Option<TargetDate>, DateError>,
) -> Result<Option<TargetDate>> {
    selection.context("no countdown started")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_is_an_error() {
        let err = selected_target(Err(DateError::Malformed {
            input: "2030-06-15".to_string(),
        }))
        .unwrap_err();
        assert!(err.root_cause().to_string().contains("2030-06-15"), "{err:#}");
    }

    #[test]
    fn test_empty_and_valid_dates_pass_through() {
        assert_eq!(selected_target(Ok(None)).unwrap(), None);
        let target = TargetDate::from_ymd(2030, 6, 15);
        assert_eq!(selected_target(Ok(target)).unwrap(), target);
    }

    #[test]
    fn test_cli_accepts_date_and_flags() {
        let cli = Cli::try_parse_from(["event-countdown", "15-06-2030", "--dark", "--seed", "7"])
            .unwrap();
        assert_eq!(cli.date.as_deref(), Some("15-06-2030"));
        assert!(cli.dark);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.fps, 30);
    }
}
