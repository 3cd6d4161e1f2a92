use serde::{Deserialize, Serialize};

use super::target_date::TargetDate;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Urgency classification of the time left before the target day.
///
/// Variants are ordered by urgency so transitions can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    /// No target selected, or the selection could not be parsed
    Pending,
    /// More than the last-day threshold remaining
    Far,
    /// Within the last day, but more than the last-hour threshold
    LastDay,
    /// Within the last hour, event not yet started
    LastHour,
    /// The target day has arrived
    EventDay,
}

impl Default for CountdownPhase {
    fn default() -> Self {
        Self::Pending
    }
}

/// Why a countdown is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingReason {
    NoTarget,
    InvalidDate,
}

/// Boundaries between the urgency phases, in milliseconds.
///
/// Both bounds are inclusive: exactly `last_hour_ms` remaining is `LastHour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    pub last_hour_ms: u64,
    pub last_day_ms: u64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            last_hour_ms: MS_PER_HOUR,
            last_day_ms: MS_PER_DAY,
        }
    }
}

impl PhaseThresholds {
    pub fn is_valid(&self) -> bool {
        self.last_hour_ms > 0 && self.last_hour_ms < self.last_day_ms
    }

    /// Phase for a positive remaining duration. Zero maps to `EventDay`.
    pub fn classify(&self, remaining_ms: u64) -> CountdownPhase {
        if remaining_ms == 0 {
            CountdownPhase::EventDay
        } else if remaining_ms <= self.last_hour_ms {
            CountdownPhase::LastHour
        } else if remaining_ms <= self.last_day_ms {
            CountdownPhase::LastDay
        } else {
            CountdownPhase::Far
        }
    }
}

/// Output of one engine evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownState {
    pub phase: CountdownPhase,
    /// `None` while pending, otherwise clamped to zero or above
    pub remaining_ms: Option<u64>,
}

impl CountdownState {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn is_event_day(&self) -> bool {
        self.phase == CountdownPhase::EventDay
    }
}

/// Whole days, hours, minutes and seconds of a remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeBreakdown {
    pub fn from_millis(remaining_ms: u64) -> Self {
        let total_seconds = remaining_ms / MS_PER_SECOND;
        Self {
            days: total_seconds / 86_400,
            hours: (total_seconds % 86_400) / 3_600,
            minutes: (total_seconds % 3_600) / 60,
            seconds: total_seconds % 60,
        }
    }
}

/// Value published to the rendering side on every tick.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub target: Option<TargetDate>,
    pub phase: CountdownPhase,
    pub remaining_ms: Option<u64>,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub pending_reason: Option<PendingReason>,
}

impl CountdownSnapshot {
    pub fn pending(reason: PendingReason) -> Self {
        Self {
            pending_reason: Some(reason),
            ..Self::default()
        }
    }

    pub fn from_state(target: TargetDate, state: CountdownState) -> Self {
        let breakdown = state
            .remaining_ms
            .map(TimeBreakdown::from_millis)
            .unwrap_or_default();
        Self {
            target: Some(target),
            phase: state.phase,
            remaining_ms: state.remaining_ms,
            days: breakdown.days,
            hours: breakdown.hours,
            minutes: breakdown.minutes,
            seconds: breakdown.seconds,
            pending_reason: None,
        }
    }

    pub fn breakdown(&self) -> TimeBreakdown {
        TimeBreakdown {
            days: self.days,
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(1, CountdownPhase::LastHour ; "one millisecond")]
    #[test_case(3_600_000, CountdownPhase::LastHour ; "exactly one hour")]
    #[test_case(3_600_001, CountdownPhase::LastDay ; "just over one hour")]
    #[test_case(86_400_000, CountdownPhase::LastDay ; "exactly one day")]
    #[test_case(86_400_001, CountdownPhase::Far ; "just over one day")]
    #[test_case(0, CountdownPhase::EventDay ; "elapsed")]
    fn test_default_boundaries(remaining_ms: u64, expected: CountdownPhase) {
        assert_eq!(PhaseThresholds::default().classify(remaining_ms), expected);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = PhaseThresholds {
            last_hour_ms: 5 * 60_000,
            last_day_ms: MS_PER_HOUR,
        };
        assert!(thresholds.is_valid());
        assert_eq!(thresholds.classify(5 * 60_000), CountdownPhase::LastHour);
        assert_eq!(thresholds.classify(30 * 60_000), CountdownPhase::LastDay);
        assert_eq!(thresholds.classify(2 * MS_PER_HOUR), CountdownPhase::Far);
    }

    #[test]
    fn test_inverted_thresholds_are_invalid() {
        let thresholds = PhaseThresholds {
            last_hour_ms: MS_PER_DAY,
            last_day_ms: MS_PER_HOUR,
        };
        assert!(!thresholds.is_valid());
    }

    #[test]
    fn test_breakdown_splits_units() {
        let ms = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        assert_eq!(
            TimeBreakdown::from_millis(ms),
            TimeBreakdown {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5,
            }
        );
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(CountdownPhase::EventDay > CountdownPhase::LastHour);
        assert!(CountdownPhase::LastHour > CountdownPhase::LastDay);
        assert!(CountdownPhase::LastDay > CountdownPhase::Far);
    }

    #[test]
    fn test_snapshot_serialization() {
        let target = TargetDate::from_ymd(2030, 6, 15).unwrap();
        let snapshot = CountdownSnapshot::from_state(
            target,
            CountdownState {
                phase: CountdownPhase::LastDay,
                remaining_ms: Some(MS_PER_HOUR * 2),
            },
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\":\"last_day\""));
        assert!(json.contains("\"target\":\"15-06-2030\""));
        let back: CountdownSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
