//! Repository for the append-only `event_logs` table.

use playerdesk_core::logs::{LogQuery, SortOrder};
use playerdesk_core::types::{DbId, Timestamp};
use sqlx::MySqlPool;

use crate::models::event_log::EventLogRow;

const EVENT_LOG_COLUMNS: &str = "id, payload, created_at";

pub struct EventLogRepo;

impl EventLogRepo {
    /// Insert one event, returning its generated ID.
    pub async fn insert(
        pool: &MySqlPool,
        payload: &str,
        created_at: Timestamp,
    ) -> Result<DbId, sqlx::Error> {
        let result = sqlx::query("INSERT INTO event_logs (payload, created_at) VALUES (?, ?)")
            .bind(payload)
            .bind(created_at)
            .execute(pool)
            .await?;
        Ok(result.last_insert_id() as DbId)
    }

    /// Events matching every filter in `query`, ordered by time.
    ///
    /// Filter field names are expected to be pre-validated
    /// (`[A-Za-z0-9_]+`); they are still passed as bound JSON paths.
    pub async fn query(
        pool: &MySqlPool,
        query: &LogQuery,
    ) -> Result<Vec<EventLogRow>, sqlx::Error> {
        let conditions: Vec<&str> = query
            .filters
            .keys()
            .map(|_| "JSON_UNQUOTE(JSON_EXTRACT(payload, ?)) = ?")
            .collect();

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order_clause = match query.order {
            SortOrder::Asc => "ORDER BY created_at ASC, id ASC",
            SortOrder::Desc => "ORDER BY created_at DESC, id DESC",
        };

        let sql = format!(
            "SELECT {EVENT_LOG_COLUMNS} FROM event_logs {where_clause} {order_clause} LIMIT ?"
        );

        let mut q = sqlx::query_as::<_, EventLogRow>(&sql);
        for (field, value) in &query.filters {
            q = q.bind(format!("$.\"{field}\"")).bind(value);
        }
        q.bind(query.limit).fetch_all(pool).await
    }
}
