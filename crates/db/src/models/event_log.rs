//! Rows from the `event_logs` table.

use playerdesk_core::logs::LogEntry;
use playerdesk_core::normalize::normalize;
use playerdesk_core::types::{DbId, Timestamp};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventLogRow {
    pub id: DbId,
    /// The event object as JSON text.
    pub payload: String,
    pub created_at: Timestamp,
}

impl From<EventLogRow> for LogEntry {
    fn from(row: EventLogRow) -> Self {
        Self {
            id: row.id,
            timestamp: row.created_at,
            event: normalize(Some(Value::String(row.payload))),
        }
    }
}
