//! Bucketing of forecast entries by calendar day.

use std::{cmp::Ordering, collections::HashMap};

use crate::{
    format::{parse_date_prefix, parse_timestamp},
    model::{ForecastEntry, GroupedDay},
};

/// Calendar-day identity of a timestamp, e.g. `Mon Jan 01 2024`.
///
/// The date is the one written in the timestamp; no zone conversion happens.
/// Unparseable timestamps use their leading `YYYY-MM-DD` when present, and
/// otherwise their text before the first `T` or space.
pub fn day_key(timestamp: &str) -> String {
    let date = parse_timestamp(timestamp)
        .map(|parsed| parsed.local.date())
        .or_else(|| parse_date_prefix(timestamp));

    match date {
        Some(date) => date.format("%a %b %d %Y").to_string(),
        None => timestamp
            .trim()
            .split(['T', ' '])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Group entries by day.
///
/// Day buckets keep the order in which their day first appears in `entries`;
/// entries inside a bucket are sorted ascending by timestamp (stable).
pub fn group(entries: &[ForecastEntry]) -> Vec<GroupedDay> {
    let mut days: Vec<GroupedDay> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = day_key(&entry.timestamp);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            days.push(GroupedDay { day_key: key, entries: Vec::new() });
            days.len() - 1
        });
        days[slot].entries.push(entry.clone());
    }

    for day in &mut days {
        day.entries.sort_by(|a, b| compare_timestamps(&a.timestamp, &b.timestamp));
    }

    days
}

fn compare_timestamps(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(x), Some(y)) => x.instant.cmp(&y.instant).then_with(|| a.cmp(b)),
        // Unparseable timestamps sort after parseable ones.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
