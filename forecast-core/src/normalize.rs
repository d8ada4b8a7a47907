//! Recovery of the forecast entry array from a response envelope.
//!
//! A caching layer upstream may persist a response that was already wrapped,
//! so the array can sit several `data` levels deep:
//! `{ "success": true, "data": { "success": true, "data": [ ... ] } }`.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{EntryJson, ForecastEntry};

/// Upper bound on `data` levels descended before giving up.
pub const MAX_UNWRAP_DEPTH: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("response has no forecast array (stopped at a {0})")]
    NotAnArray(&'static str),

    #[error("response nests `data` deeper than {} levels", MAX_UNWRAP_DEPTH)]
    TooDeep,

    #[error("forecast entry {index} is malformed: {reason}")]
    BadEntry { index: usize, reason: String },
}

/// Walk down `.data` until an array is reached. The input is only borrowed.
pub fn unwrap_envelope(raw: &Value) -> Result<&[Value], NormalizeError> {
    let mut current = raw;

    for _ in 0..=MAX_UNWRAP_DEPTH {
        match current {
            Value::Array(items) => return Ok(items),
            Value::Object(map) => match map.get("data") {
                Some(inner) => current = inner,
                None => return Err(NormalizeError::NotAnArray("object without `data`")),
            },
            other => return Err(NormalizeError::NotAnArray(kind_of(other))),
        }
    }

    Err(NormalizeError::TooDeep)
}

/// Decode the canonical entry sequence from a response of unknown shape.
pub fn normalize(raw: &Value) -> Result<Vec<ForecastEntry>, NormalizeError> {
    unwrap_envelope(raw)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            EntryJson::deserialize(item)
                .map(ForecastEntry::from)
                .map_err(|e| NormalizeError::BadEntry { index, reason: e.to_string() })
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
