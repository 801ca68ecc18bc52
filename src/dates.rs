use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A timestamp as it arrives from storage or an imported snapshot.
///
/// Nothing is validated on the way in: a `DateValue` is only turned into an
/// instant through [`DateValue::resolve`], which yields `None` for anything
/// it cannot read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    Text(String),
    /// Any other JSON value; never resolves
    Unrecognized(serde_json::Value),
}

impl DateValue {
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        DateValue::Text(value.to_rfc3339())
    }

    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            DateValue::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            DateValue::Text(text) => parse_timestamp(text),
            DateValue::Unrecognized(_) => None,
        }
    }

    /// Calendar day (UTC) of the resolved instant
    pub fn day(&self) -> Option<NaiveDate> {
        self.resolve().map(|instant| instant.date_naive())
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        DateValue::from_datetime(value)
    }
}

/// Parses a timestamp leniently.
///
/// Accepts RFC 3339, naive ISO date-times (read as UTC) and bare dates (UTC
/// midnight). Returns `None` for anything else, including the empty string.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Fractional days elapsed from `from` to `to` (negative if `to` is earlier)
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

pub fn previous_day(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_signed(Duration::days(1))
}
