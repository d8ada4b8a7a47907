//! Timestamp parsing and display formatting.
//!
//! Timestamps are interpreted in whatever zone they carry. Naive values such as
//! `2024-01-01 09:00:00` are taken as-is and never converted.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// `%#z` also accepts `Z` and offsets without minutes.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Display strings for one timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDateTime {
    /// Short date, e.g. `Mon, Jan 1`.
    pub date: String,
    /// 12-hour time, e.g. `09:00 AM`.
    pub time: String,
}

/// A timestamp split into its embedded wall-clock time and an instant usable for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedTimestamp {
    pub local: NaiveDateTime,
    pub instant: NaiveDateTime,
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<ParsedTimestamp> {
    let raw = raw.trim();

    if let Some(dt) = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    }) {
        return Some(ParsedTimestamp { local: dt.naive_local(), instant: dt.naive_utc() });
    }

    if let Some(local) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ParsedTimestamp { local, instant: local });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|local| ParsedTimestamp { local, instant: local })
}

/// Calendar date from a leading `YYYY-MM-DD`, for timestamps whose time part is unreadable.
pub(crate) fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Format a server timestamp for display. Returns `None` when it cannot be parsed.
pub fn format_timestamp(raw: &str) -> Option<FormattedDateTime> {
    let parsed = parse_timestamp(raw)?;

    Some(FormattedDateTime {
        date: parsed.local.format("%a, %b %-d").to_string(),
        time: parsed.local.format("%I:%M %p").to_string(),
    })
}
