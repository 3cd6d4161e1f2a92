//! Target date model.
//!
//! A `TargetDate` is the calendar day a countdown runs toward. It is parsed
//! from the strict `dd-mm-yyyy` form handed over by the date picker and is
//! always interpreted as a local calendar date, never as a UTC instant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::{is_same_day, local_midnight};

/// Format string used when exchanging dates with the picker.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A validated Gregorian calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetDate(NaiveDate);

/// Reasons a date string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Nothing was selected. Not a failure for the countdown, which simply
    /// stays pending, but reported separately for messaging.
    #[error("no date selected")]
    Empty,

    /// The input does not have the `dd-mm-yyyy` shape.
    #[error("'{input}' is not in dd-mm-yyyy format")]
    Malformed { input: String },

    /// The input has the right shape but names a day that does not exist.
    #[error("'{input}' is not a real calendar date")]
    NotACalendarDate { input: String },
}

impl TargetDate {
    /// Builds a target from calendar components, rejecting impossible days.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The instant the countdown runs toward: local midnight of the day.
    pub fn local_midnight(&self) -> DateTime<Local> {
        local_midnight(self.0)
    }

    /// True when `now` falls on this calendar day in local time.
    pub fn is_today(&self, now: DateTime<Local>) -> bool {
        is_same_day(self.local_midnight(), now)
    }

    /// Date picker rule: only days after `today` may be chosen.
    pub fn is_selectable(&self, today: NaiveDate) -> bool {
        self.0 > today
    }
}

impl From<NaiveDate> for TargetDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day(), self.month(), self.year())
    }
}

impl FromStr for TargetDate {
    type Err = DateError;

    /// Strict `dd-mm-yyyy` parsing. Rollover inputs such as `31-04-2030`
    /// are rejected rather than moved into the next month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(DateError::Empty);
        }

        let malformed = || DateError::Malformed {
            input: input.to_string(),
        };

        let bytes = input.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
            return Err(malformed());
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
        if !digits_ok {
            return Err(malformed());
        }

        let day: u32 = input[0..2].parse().map_err(|_| malformed())?;
        let month: u32 = input[3..5].parse().map_err(|_| malformed())?;
        let year: i32 = input[6..10].parse().map_err(|_| malformed())?;

        Self::from_ymd(year, month, day).ok_or_else(|| DateError::NotACalendarDate {
            input: input.to_string(),
        })
    }
}

impl TryFrom<String> for TargetDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetDate> for String {
    fn from(date: TargetDate) -> Self {
        date.to_string()
    }
}

/// Parses picker input, treating an empty selection as "no target".
pub fn parse_date_input(input: &str) -> Result<Option<TargetDate>, DateError> {
    match input.parse::<TargetDate>() {
        Ok(date) => Ok(Some(date)),
        Err(DateError::Empty) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Formats a day chosen in a picker back into the exchange format.
pub fn format_picked_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
