//! Handlers for the event log.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use playerdesk_core::logs::{LogEntry, LogQuery};
use playerdesk_core::types::DbId;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::log_key::LogIngestKey;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ok: bool,
    pub id: DbId,
}

/// POST /api/logs
///
/// Requires the `x-api-key` header. The body must be a JSON object; the
/// server sets its timestamp.
pub async fn ingest(
    _key: LogIngestKey,
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<IngestResponse>)> {
    let Json(body) = payload?;
    let id = state.event_log.ingest(body).await?;
    Ok((StatusCode::CREATED, Json(IngestResponse { ok: true, id })))
}

/// GET /api/logs?limit=&order=&<field>=<value>
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<LogEntry>>> {
    let query = LogQuery::from_params(params)?;
    let entries = state.event_log.query(&query).await?;
    Ok(Json(entries))
}
