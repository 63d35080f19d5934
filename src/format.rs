//! Form Input Formatting
//!
//! Conversions between the backend's UTC timestamps and the local-time
//! string shapes used by calendar form inputs:
//! - `YYYY-MM-DD` for date inputs
//! - `YYYY-MM-DDTHH:MM` for datetime inputs
//! - human-readable display strings for tables
//!
//! The `to_*` functions render an empty string for a missing value. The
//! `from_*` functions return `None` for anything unparseable, which the
//! submit gate treats as a missing field.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATE_INPUT: &str = "%Y-%m-%d";
const DATETIME_INPUT: &str = "%Y-%m-%dT%H:%M";
const DATE_DISPLAY: &str = "%b %e, %Y";
const DATETIME_DISPLAY: &str = "%b %e, %Y %H:%M";

/// Local calendar date for a date input field
pub fn to_date_input_value(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format(DATE_INPUT).to_string(),
        None => String::new(),
    }
}

/// Interpret a `YYYY-MM-DD` value as local midnight
pub fn from_date_input_value(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_INPUT).ok()?;
    local_to_utc(date.and_hms_opt(0, 0, 0)?)
}

/// Local wall-clock value for a datetime input field
pub fn to_datetime_local_value(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format(DATETIME_INPUT).to_string(),
        None => String::new(),
    }
}

/// Interpret a `YYYY-MM-DDTHH:MM` value in local time
pub fn from_datetime_local_value(value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), DATETIME_INPUT).ok()?;
    local_to_utc(naive)
}

/// Display string for a date-only table column
pub fn format_date(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format(DATE_DISPLAY).to_string(),
        None => String::new(),
    }
}

/// Display string for a timestamp table column
pub fn format_datetime(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format(DATETIME_DISPLAY).to_string(),
        None => String::new(),
    }
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    // earliest() picks the first wall-clock instant on DST transitions
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
