//! Colours, palette and text helpers for rendering a countdown.
//!
//! Hosts own layout and styling; this module only decides which colour a
//! phase is shown in, which colours the confetti uses, how the remaining
//! time reads, and how strongly urgent text pulses.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::countdown::{CountdownPhase, CountdownSnapshot};
use crate::models::settings::PresentationMode;
use crate::services::pulse::PulseAnimator;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }
}

// ── Theme roles ────────────────────────────────────────────────────

struct Scheme {
    primary: RgbaColor,
    secondary: RgbaColor,
    tertiary: RgbaColor,
    error: RgbaColor,
    muted: RgbaColor,
}

static LIGHT: Scheme = Scheme {
    primary: RgbaColor::opaque(0x6750A4),
    secondary: RgbaColor::opaque(0x625B71),
    tertiary: RgbaColor::opaque(0x7D5260),
    error: RgbaColor::opaque(0xB3261E),
    muted: RgbaColor::opaque(0x49454F),
};

static DARK: Scheme = Scheme {
    primary: RgbaColor::opaque(0xD0BCFF),
    secondary: RgbaColor::opaque(0xCCC2DC),
    tertiary: RgbaColor::opaque(0xEFB8C8),
    error: RgbaColor::opaque(0xF2B8B5),
    muted: RgbaColor::opaque(0xCAC4D0),
};

const LAST_DAY_ORANGE: RgbaColor = RgbaColor::opaque(0xFF9800);
const CELEBRATION_GOLD: RgbaColor = RgbaColor::opaque(0xFFD54F);

const CONFETTI_ACCENTS: [RgbaColor; 4] = [
    RgbaColor::opaque(0xFFC107),
    RgbaColor::opaque(0xE91E63),
    RgbaColor::opaque(0x4CAF50),
    RgbaColor::opaque(0x2196F3),
];

fn scheme(mode: PresentationMode) -> &'static Scheme {
    match mode {
        PresentationMode::Light => &LIGHT,
        PresentationMode::Dark => &DARK,
    }
}

/// Text colour for the remaining-time line.
pub fn phase_color(phase: CountdownPhase, mode: PresentationMode) -> RgbaColor {
    let scheme = scheme(mode);
    match phase {
        CountdownPhase::EventDay => scheme.primary,
        CountdownPhase::LastHour => scheme.error,
        CountdownPhase::LastDay => LAST_DAY_ORANGE,
        CountdownPhase::Far | CountdownPhase::Pending => scheme.muted,
    }
}

pub fn celebration_text_color(mode: PresentationMode) -> RgbaColor {
    match mode {
        PresentationMode::Dark => CELEBRATION_GOLD,
        PresentationMode::Light => scheme(mode).primary,
    }
}

/// Confetti colours: the three theme roles followed by fixed accents.
pub fn confetti_palette(mode: PresentationMode) -> Vec<RgbaColor> {
    let scheme = scheme(mode);
    let mut palette = vec![scheme.primary, scheme.secondary, scheme.tertiary];
    palette.extend_from_slice(&CONFETTI_ACCENTS);
    palette
}

/// `"02 d  03 h  04 m  05 s"`
pub fn format_remaining(snapshot: &CountdownSnapshot) -> String {
    format!(
        "{:02} d  {:02} h  {:02} m  {:02} s",
        snapshot.days, snapshot.hours, snapshot.minutes, snapshot.seconds
    )
}

/// Scale factor for countdown text. Urgent phases pulse, others stay at 1.
pub fn text_scale(phase: CountdownPhase, elapsed: Duration) -> f32 {
    match phase {
        CountdownPhase::LastHour | CountdownPhase::EventDay => {
            PulseAnimator::urgency_pulse().value_at(elapsed)
        }
        _ => 1.0,
    }
}
