//! Shared-secret extractor guarding log ingestion.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use playerdesk_core::error::CoreError;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the log ingestion secret.
pub const LOG_KEY_HEADER: &str = "x-api-key";

/// Proof that the request presented the configured `LOG_API_KEY`.
///
/// ```ignore
/// async fn ingest(_key: LogIngestKey, State(state): State<AppState>) -> AppResult<()> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogIngestKey;

impl FromRequestParts<AppState> for LogIngestKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.log_api_key.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("Log ingestion is disabled".into()))
        })?;

        let presented = parts
            .headers
            .get(LOG_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("Missing API key".into())))?;

        if !keys_match(presented, expected) {
            tracing::warn!("Rejected log ingestion with wrong API key");
            return Err(AppError::Core(CoreError::Forbidden(
                "Invalid API key".into(),
            )));
        }

        Ok(LogIngestKey)
    }
}

/// Compare keys by SHA-256 digest so the comparison length does not depend
/// on the secret.
fn keys_match(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_keys_match() {
        assert!(keys_match("s3cret", "s3cret"));
    }

    #[test]
    fn different_keys_do_not_match() {
        assert!(!keys_match("s3cret", "s3cre"));
        assert!(!keys_match("", "s3cret"));
    }
}
