use std::time::Duration;

/// Failure of the backing store itself (as opposed to a domain miss).
///
/// The message carried here is for logs only; it is never sent to clients.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Store call `{operation}` timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Invalid grade {level} for job {job}")]
    InvalidGrade { job: String, level: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            key: key.into(),
        }
    }
}
