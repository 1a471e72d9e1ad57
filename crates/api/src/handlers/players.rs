//! Handlers for player search, account and character lookup, and job
//! assignment.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use playerdesk_core::assignment::AssignedJob;
use playerdesk_core::player::{AccountView, CharacterView, PlayerSearchResult};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for `GET /api/players`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Body of `POST /api/player/{citizenid}/job`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignJobRequest {
    pub job_name: Option<String>,
    pub grade_level: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AssignJobResponse {
    pub ok: bool,
    pub job: AssignedJob,
}

const ASSIGN_FIELDS_REQUIRED: &str = "jobName and gradeLevel are required";

/// GET /api/players?q=
///
/// At most one entry per account; an empty `q` returns `[]`.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<PlayerSearchResult>>> {
    let results = state.directory.search(&params.q).await?;
    Ok(Json(results))
}

/// GET /api/account/{user_id}
pub async fn get_account(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<AccountView>> {
    let account = state.directory.account(&user_id).await?;
    Ok(Json(account))
}

/// GET /api/player/{citizenid}
pub async fn get_character(
    State(state): State<AppState>,
    Path(citizenid): Path<String>,
) -> AppResult<Json<CharacterView>> {
    let character = state.directory.character(&citizenid).await?;
    Ok(Json(character))
}

/// POST /api/player/{citizenid}/job
///
/// Any body that does not carry a non-empty `jobName` string and an integer
/// `gradeLevel` is rejected with 400 before the store is touched.
pub async fn assign_job(
    State(state): State<AppState>,
    Path(citizenid): Path<String>,
    payload: Result<Json<AssignJobRequest>, JsonRejection>,
) -> AppResult<Json<AssignJobResponse>> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected job assignment body");
        AppError::BadRequest(ASSIGN_FIELDS_REQUIRED.into())
    })?;

    let (job_name, grade_level) = match (input.job_name, input.grade_level) {
        (Some(job_name), Some(grade_level)) if !job_name.is_empty() => (job_name, grade_level),
        _ => return Err(AppError::BadRequest(ASSIGN_FIELDS_REQUIRED.into())),
    };

    let job = state
        .assignments
        .assign(&citizenid, &job_name, grade_level)
        .await?;
    Ok(Json(AssignJobResponse { ok: true, job }))
}
