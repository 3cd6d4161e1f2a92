// Property-based tests for target date parsing
// Any calendar date survives formatting and parsing; anything else is rejected

use chrono::{Datelike, NaiveDate};
use event_countdown::models::target_date::format_picked_date;
use event_countdown::{parse_date_input, DateError, TargetDate};
use proptest::prelude::*;

proptest! {
    /// Property: a picked date formats to dd-mm-yyyy and parses back to itself
    #[test]
    fn prop_picked_dates_round_trip(
        year in 1000..=9999i32,
        month in 1..=12u32,
        day in 1..=31u32,
    ) {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let text = format_picked_date(date);
            prop_assert_eq!(text.len(), 10);

            let parsed = parse_date_input(&text).unwrap().unwrap();
            prop_assert_eq!(parsed.naive(), date);
            prop_assert_eq!(parsed.to_string(), text);
        }
    }

    /// Property: digits in the right shape that name no real day are rejected
    #[test]
    fn prop_impossible_days_are_rejected(
        year in 1000..=9999i32,
        month in 1..=12u32,
        day in 29..=99u32,
    ) {
        let input = format!("{day:02}-{month:02}-{year:04}");
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => prop_assert_eq!(input.parse::<TargetDate>().unwrap().day(), date.day()),
            None => {
                let is_calendar_error = matches!(
                    input.parse::<TargetDate>(),
                    Err(DateError::NotACalendarDate { .. })
                );
                prop_assert!(is_calendar_error);
            }
        }
    }

    /// Property: anything that is not exactly dd-mm-yyyy never parses
    #[test]
    fn prop_other_shapes_never_parse(input in "[0-9/.-]{1,12}") {
        let well_formed = input.len() == 10
            && input.as_bytes()[2] == b'-'
            && input.as_bytes()[5] == b'-'
            && input.bytes().enumerate().all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
        if !well_formed {
            prop_assert!(input.parse::<TargetDate>().is_err());
        }
    }
}
