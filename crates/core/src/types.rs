/// Event log primary keys are MySQL `BIGINT AUTO_INCREMENT`.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A canonical JSON object, as re-materialized from a stored column.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
