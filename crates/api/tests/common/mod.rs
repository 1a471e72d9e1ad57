#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use playerdesk_api::config::ServerConfig;
use playerdesk_api::router::build_app_router;
use playerdesk_api::state::AppState;
use playerdesk_core::job::{GradeRecord, JobRecord};
use playerdesk_core::memory::InMemoryStore;
use playerdesk_core::player::CharacterRecord;

pub const TEST_LOG_KEY: &str = "test-log-key";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a one-second store timeout and a known log ingestion key.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 10,
        db_acquire_timeout_secs: 10,
        store_timeout_ms: 1000,
        log_api_key: Some(TEST_LOG_KEY.to_string()),
        static_dir: None,
    }
}

/// Build the full application router over an in-memory store.
pub fn build_test_app(store: Arc<InMemoryStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: Arc<InMemoryStore>, config: ServerConfig) -> Router {
    let handle = store.into_handle(config.store_timeout());
    let state = AppState::new(handle, Arc::new(config.clone()));
    build_app_router(state, &config)
}

/// A store holding two accounts, three characters and a small job catalog.
///
/// `ABC123` is on duty as an EMS medic.
pub fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());

    store.insert_character(CharacterRecord {
        citizenid: "ABC123".to_string(),
        user_id: "license:aaa".to_string(),
        name: "Alex Mercer".to_string(),
        money: Some(json!(r#"{"cash":500,"bank":12000}"#)),
        job: Some(json!(
            r#"{"name":"ambulance","label":"EMS","grade":{"level":1,"name":"Medic"},"payment":300,"onduty":true,"isboss":false}"#
        )),
        info: Some(json!(r#"{"firstname":"Alex","lastname":"Mercer"}"#)),
    });
    store.insert_character(CharacterRecord {
        citizenid: "DEF456".to_string(),
        user_id: "license:aaa".to_string(),
        name: "Alexis Stone".to_string(),
        money: Some(json!("not json")),
        job: None,
        info: None,
    });
    store.insert_character(CharacterRecord {
        citizenid: "GHI789".to_string(),
        user_id: "license:bbb".to_string(),
        name: "Sam Reyes".to_string(),
        money: None,
        job: None,
        info: Some(json!({"firstname": "Sam"})),
    });

    for (name, label) in [("police", "Police"), ("ambulance", "EMS"), ("mechanic", "Benny's")] {
        store.insert_job(JobRecord {
            name: name.to_string(),
            label: label.to_string(),
        });
    }

    for (job_name, level, name, payment, is_boss) in [
        ("police", 4, "Chief", 1200, true),
        ("police", 3, "Officer", 500, false),
        ("police", 0, "Cadet", 100, false),
        ("ambulance", 1, "Medic", 300, false),
        ("ghost", 0, "Nobody", 0, false),
    ] {
        store.insert_grade(GradeRecord {
            job_name: job_name.to_string(),
            level,
            name: name.to_string(),
            payment,
            is_boss,
        });
    }

    store
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, &body.to_string(), &[]).await
}

pub async fn post_json_with_headers(
    app: Router,
    uri: &str,
    body: Value,
    headers: &[(&str, &str)],
) -> Response {
    post_raw(app, uri, &body.to_string(), headers).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
