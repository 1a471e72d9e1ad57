pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /players?q=                       search accounts by id or character name
/// /account/{user_id}                all characters on an account
/// /player/{citizenid}               one character
/// /player/{citizenid}/job           assign job (POST)
/// /jobs                             job catalog with grade ladders
/// /logs                             query (GET), ingest (POST, x-api-key)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/players", get(handlers::players::search))
        .route("/account/{user_id}", get(handlers::players::get_account))
        .route("/player/{citizenid}", get(handlers::players::get_character))
        .route(
            "/player/{citizenid}/job",
            post(handlers::players::assign_job),
        )
        .route("/jobs", get(handlers::jobs::list))
        .route(
            "/logs",
            get(handlers::logs::list).post(handlers::logs::ingest),
        )
}
