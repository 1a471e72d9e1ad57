//! Append-only event log: ingestion and filtered retrieval.
//!
//! Events are arbitrary JSON objects. The server stamps each one on
//! ingestion; `id` and `timestamp` are reserved and any client-supplied
//! values for them are discarded.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::store::StoreHandle;
use crate::types::{DbId, JsonMap, Timestamp};

/// Default number of log entries per query.
pub const DEFAULT_LOG_LIMIT: i64 = 100;

/// Maximum number of log entries per query.
pub const MAX_LOG_LIMIT: i64 = 1000;

/// Top-level event fields owned by the server.
pub const RESERVED_FIELDS: &[&str] = &["id", "timestamp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CoreError::Validation(format!(
                "order must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Filter, ordering and limit for a log query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Exact-match filters on top-level event fields.
    pub filters: BTreeMap<String, String>,
    pub limit: i64,
    pub order: SortOrder,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            limit: DEFAULT_LOG_LIMIT,
            order: SortOrder::default(),
        }
    }
}

impl LogQuery {
    /// Build a query from raw query-string pairs.
    ///
    /// `limit` and `order` are control parameters; every other pair is a
    /// field filter. `limit` is clamped to `1..=MAX_LOG_LIMIT`.
    pub fn from_params<I>(params: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = LogQuery::default();

        for (key, value) in params {
            match key.as_str() {
                "limit" => {
                    let limit: i64 = value.parse().map_err(|_| {
                        CoreError::Validation(format!("limit must be an integer, got '{value}'"))
                    })?;
                    query.limit = limit.clamp(1, MAX_LOG_LIMIT);
                }
                "order" => query.order = value.parse()?,
                _ => {
                    if !is_valid_field_name(&key) {
                        return Err(CoreError::Validation(format!(
                            "Invalid filter field '{key}'"
                        )));
                    }
                    query.filters.insert(key, value);
                }
            }
        }

        Ok(query)
    }
}

/// Field names usable as filters: ASCII letters, digits and underscores.
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Text form of an event field used for filter comparison.
///
/// Strings compare by content; everything else by its JSON text.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether `event` satisfies every filter in `filters`.
pub fn matches_filters(event: &JsonMap, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(field, expected)| {
        event
            .get(field)
            .is_some_and(|value| field_text(value) == *expected)
    })
}

/// An event ready to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub timestamp: Timestamp,
    pub event: JsonMap,
}

/// A stored event, serialized with its fields flattened next to `id` and
/// `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: DbId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub event: JsonMap,
}

#[derive(Clone)]
pub struct EventLog {
    store: StoreHandle,
}

impl EventLog {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Append one event. The body must be a JSON object.
    pub async fn ingest(&self, body: Value) -> Result<DbId, CoreError> {
        let Value::Object(mut event) = body else {
            return Err(CoreError::Validation(
                "Log event must be a JSON object".to_string(),
            ));
        };
        for field in RESERVED_FIELDS {
            event.remove(*field);
        }

        let entry = NewLogEntry {
            timestamp: chrono::Utc::now(),
            event,
        };
        let id = self.store.append_log(entry).await?;
        tracing::debug!(id, "Appended log event");
        Ok(id)
    }

    pub async fn query(&self, query: &LogQuery) -> Result<Vec<LogEntry>, CoreError> {
        Ok(self.store.query_logs(query).await?)
    }
}
