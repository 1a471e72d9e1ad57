//! Handler for the job catalog.

use axum::extract::State;
use axum::Json;
use playerdesk_core::job::Job;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/jobs
///
/// Jobs ordered by label, each with its grades ordered by level.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Job>>> {
    let jobs = state.catalog.list_jobs().await?;
    Ok(Json(jobs))
}
