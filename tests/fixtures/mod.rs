// Test fixtures - reusable test data
// Provides consistent instants and date inputs across the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, TimeZone};

/// Sample instants and date strings for testing
pub mod dates {
    use super::*;

    /// Target used by most scenarios, in picker format
    pub const EVENT_INPUT: &str = "15-06-2030";

    /// Local wall-clock instant with millisecond precision
    pub fn at(
        (year, month, day): (i32, u32, u32),
        (hour, minute, second): (u32, u32, u32),
        millis: i64,
    ) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .unwrap()
            + Duration::milliseconds(millis)
    }

    /// Half a second before the event day starts
    pub fn half_second_before_event() -> DateTime<Local> {
        at((2030, 6, 14), (23, 59, 59), 500)
    }

    /// Two weeks out, a quarter second past the hour
    pub fn two_weeks_before_event() -> DateTime<Local> {
        at((2030, 6, 1), (10, 0, 0), 250)
    }

    /// Mid-afternoon on the event day
    pub fn event_afternoon() -> DateTime<Local> {
        at((2030, 6, 15), (15, 0, 0), 0)
    }
}
