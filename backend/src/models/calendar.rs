//! Calendar-day parsing and the human-readable rendering used in responses.
//!
//! All days are UTC calendar days. Timestamps supplied by clients are converted
//! to UTC before their day is taken, and "today" means today in UTC.

use chrono::{DateTime, NaiveDate, Utc};

/// Response format, e.g. `Mon Jan 01 2024`.
pub const DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// ISO calendar day, e.g. `2024-01-01`.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date: {0:?}")]
pub struct InvalidDate(pub String);

/// Render a calendar day in [`DISPLAY_FORMAT`].
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parse a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and the [`DISPLAY_FORMAT`]
/// produced by [`format_calendar_date`].
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, InvalidDate> {
    let input = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, ISO_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(input, DISPLAY_FORMAT).map_err(|_| InvalidDate(raw.to_string()))
}

/// Today's calendar day in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod calendar_tests;
