use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Reduces a stored date value to its calendar day
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp. Timestamps keep
/// the calendar day of the offset they were written with; time-of-day is dropped
/// so period boundaries never depend on the reader's timezone.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| {
            format!(
                "Invalid date '{}'. Expected YYYY-MM-DD or an RFC 3339 timestamp",
                value
            )
        })
}

/// Serde adapter for record dates, used as `#[serde(deserialize_with = ...)]`
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}
