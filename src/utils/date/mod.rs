// Date utility functions
// Local-calendar helpers shared by the date normalizer and the countdown engine

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// Local midnight of `date`.
///
/// When 00:00 falls inside a DST gap the first valid local instant of the day
/// is returned instead; ambiguous midnights resolve to the earlier reading.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let mut naive = date.and_time(NaiveTime::MIN);
    for _ in 0..(24 * 4) {
        if let Some(dt) = Local.from_local_datetime(&naive).earliest() {
            return dt;
        }
        naive += Duration::minutes(15);
    }
    // No zone skips a full day; treat the wall reading as UTC as a last resort.
    Local.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Milliseconds until the next whole wall-clock second, in `1..=1000`.
pub fn millis_to_next_second(now: DateTime<Local>) -> u64 {
    let into_second = now.timestamp_millis().rem_euclid(1000) as u64;
    1000 - into_second
}
