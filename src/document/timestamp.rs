//! `postedTime` parsing and rendering
//!
//! Rendering matches the millisecond UTC form that JSON-encoded dates take in
//! document databases: `2021-01-01T00:00:00.000Z`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use super::errors::{DocumentError, DocumentResult};

/// Layouts with a numeric offset that RFC 3339 rejects, e.g. `+0000`
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Offset-less layouts, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp string into a UTC instant.
///
/// Tries RFC 3339, then RFC 2822, then colon-less offsets, then offset-less
/// date-times and finally a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_posted_time(raw: &str) -> DocumentResult<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(invalid(raw, "empty timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(invalid(raw, "unrecognized timestamp format"))
}

fn invalid(raw: &str, reason: &str) -> DocumentError {
    DocumentError::InvalidTimestamp {
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn render(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for fields rendered with [`render`]
pub mod js_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::render(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_posted_time(&raw).map_err(serde::de::Error::custom)
    }
}
