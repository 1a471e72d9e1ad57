//! Codec for JSON-shaped character columns (`money`, `job`, `charinfo`).
//!
//! The game server writes these columns as JSON text, but older rows and
//! other tooling leave them as `NULL`, as malformed text, or (from a JSON
//! column type) as an already-decoded object. [`normalize`] folds all of
//! these into a [`JsonMap`] and never fails: anything that is not an object
//! decodes to an empty map.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::JsonMap;

/// Source column names for a character's personal info, in lookup order.
///
/// `charinfo` is the current name; `info` is the legacy one.
pub const INFO_FIELDS: &[&str] = &["charinfo", "info"];

/// Decode a stored column value into a JSON object.
///
/// Accepts an object, a JSON-text encoding of one, or nothing. Every other
/// input (null, numbers, arrays, malformed text) yields an empty map.
pub fn normalize(raw: Option<Value>) -> JsonMap {
    match raw {
        Some(Value::Object(map)) => map,
        Some(Value::String(text)) => decode_text(&text),
        _ => JsonMap::new(),
    }
}

fn decode_text(text: &str) -> JsonMap {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(_) => JsonMap::new(),
        Err(e) => {
            tracing::debug!(error = %e, "Stored column is not valid JSON, using empty object");
            JsonMap::new()
        }
    }
}

/// Return the first non-null value among `names`, asking `lookup` for each
/// in order.
///
/// Used with [`INFO_FIELDS`] so the primary/legacy column choice is made in
/// one place.
pub fn resolve_first<F>(names: &[&str], mut lookup: F) -> Option<Value>
where
    F: FnMut(&str) -> Option<Value>,
{
    names
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.is_null()))
}

/// Encode a value as JSON text for storage in a character column.
pub fn encode_column<T: Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value)
        .map_err(|e| CoreError::Internal(format!("Failed to encode column value: {e}")))
}
