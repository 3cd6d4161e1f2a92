// Terminal front-end
// Draws the countdown line and ASCII confetti with 24-bit ANSI colours

use std::io::{self, Stdout, Write};

use event_countdown::models::countdown::{CountdownPhase, CountdownSnapshot, PendingReason};
use event_countdown::models::particle::{ParticleFrame, Viewport};
use event_countdown::models::settings::PresentationMode;
use event_countdown::services::presentation::{
    celebration_text_color, format_remaining, phase_color, RgbaColor,
};

/// Virtual pixels per terminal cell, so motion tuned for screens maps onto
/// a character grid.
const CELL_WIDTH_PX: f32 = 8.0;
const CELL_HEIGHT_PX: f32 = 16.0;

const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];

const RESET: &str = "\x1b[0m";

pub struct TerminalRenderer {
    cols: u16,
    rows: u16,
    palette: Vec<RgbaColor>,
    mode: PresentationMode,
    celebration_text: String,
    out: Stdout,
    drawing: bool,
}

impl TerminalRenderer {
    pub fn new(
        cols: u16,
        rows: u16,
        palette: Vec<RgbaColor>,
        mode: PresentationMode,
        celebration_text: String,
    ) -> Self {
        Self {
            cols: cols.max(10),
            rows: rows.max(5),
            palette,
            mode,
            celebration_text,
            out: io::stdout(),
            drawing: false,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.cols as f32 * CELL_WIDTH_PX,
            self.rows as f32 * CELL_HEIGHT_PX,
        )
    }

    pub fn print_status(&mut self, snapshot: &CountdownSnapshot) -> io::Result<()> {
        let line = match snapshot.phase {
            CountdownPhase::Pending => match snapshot.pending_reason {
                Some(PendingReason::InvalidDate) => "Invalid date".to_string(),
                _ => "Select Date".to_string(),
            },
            CountdownPhase::EventDay => self.celebration_text.clone(),
            _ => format_remaining(snapshot),
        };
        let color = match snapshot.phase {
            CountdownPhase::EventDay => celebration_text_color(self.mode),
            phase => phase_color(phase, self.mode),
        };
        write!(self.out, "\r\x1b[2K{}{}{}", fg(color), line, RESET)?;
        self.out.flush()
    }

    /// Redraws the whole grid with the given particle frames and the
    /// celebration banner on the middle row. `emphasis` above 1 renders the
    /// banner in bold.
    pub fn draw_confetti(&mut self, frames: &[ParticleFrame], emphasis: f32) -> io::Result<()> {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        let mut grid: Vec<Option<(char, RgbaColor)>> = vec![None; cols * rows];

        for frame in frames {
            let col = (frame.x / CELL_WIDTH_PX).floor();
            let row = (frame.y / CELL_HEIGHT_PX).floor();
            if col < 0.0 || row < 0.0 || col >= cols as f32 || row >= rows as f32 {
                continue;
            }
            let glyph = GLYPHS[(frame.rotation.rem_euclid(180.0) / 45.0) as usize % GLYPHS.len()];
            let color = self
                .palette
                .get(frame.color_index)
                .copied()
                .unwrap_or(RgbaColor::new(255, 255, 255, 255));
            grid[row as usize * cols + col as usize] = Some((glyph, color));
        }

        if !self.drawing {
            write!(self.out, "\x1b[?25l\x1b[2J")?;
            self.drawing = true;
        }
        write!(self.out, "\x1b[H")?;

        let banner_row = rows / 2;
        let banner: Vec<char> = self.celebration_text.chars().collect();
        let banner_start = cols.saturating_sub(banner.len()) / 2;

        for row in 0..rows {
            for col in 0..cols {
                if row == banner_row && col >= banner_start && col - banner_start < banner.len() {
                    let weight = if emphasis > 1.06 { "\x1b[1m" } else { "" };
                    write!(
                        self.out,
                        "{}{}{}{}",
                        weight,
                        fg(celebration_text_color(self.mode)),
                        banner[col - banner_start],
                        RESET
                    )?;
                    continue;
                }
                match grid[row * cols + col] {
                    Some((glyph, color)) => write!(self.out, "{}{}{}", fg(color), glyph, RESET)?,
                    None => write!(self.out, " ")?,
                }
            }
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.drawing {
            write!(self.out, "\x1b[?25h")?;
            self.drawing = false;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

fn fg(color: RgbaColor) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}
