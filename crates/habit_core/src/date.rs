//! Calendar-date helpers used at the boundary between stored strings and the
//! streak engine. Dates never carry a time-of-day once they get past here.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{HabitError, Result};

pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string. Timestamps are accepted too and truncated to
/// their calendar date so that two moments on the same day compare equal.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp.date());
    }
    Err(HabitError::InvalidDate {
        input: input.to_string(),
    })
}

/// Whole calendar days from `earlier` to `later`; negative when `later` comes first.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}
