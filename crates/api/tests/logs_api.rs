//! HTTP-level integration tests for event log ingestion and querying.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_json_with_headers, seeded_store, TEST_LOG_KEY};
use serde_json::json;

const KEY: (&str, &str) = ("x-api-key", TEST_LOG_KEY);

#[tokio::test]
async fn ingest_without_key_is_forbidden() {
    let store = seeded_store();
    let app = common::build_test_app(store.clone());
    let response = post_json(app, "/api/logs", json!({"type": "kill"})).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(store);
    assert_eq!(body_json(get(app, "/api/logs").await).await, json!([]));
}

#[tokio::test]
async fn ingest_with_wrong_key_is_forbidden() {
    let app = common::build_test_app(seeded_store());
    let response = post_json_with_headers(
        app,
        "/api/logs",
        json!({"type": "kill"}),
        &[("x-api-key", "nope")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn ingest_is_refused_when_no_key_is_configured() {
    let mut config = common::test_config();
    config.log_api_key = None;
    let app = common::build_test_app_with_config(seeded_store(), config);
    let response =
        post_json_with_headers(app, "/api/logs", json!({"type": "kill"}), &[KEY]).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ingest_returns_created_with_id() {
    let app = common::build_test_app(seeded_store());
    let response =
        post_json_with_headers(app, "/api/logs", json!({"type": "kill"}), &[KEY]).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert!(json["id"].is_i64());
}

#[tokio::test]
async fn ingest_rejects_non_object_body() {
    let app = common::build_test_app(seeded_store());
    let response = post_json_with_headers(app, "/api/logs", json!([1, 2, 3]), &[KEY]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn server_sets_timestamp_and_id() {
    let store = seeded_store();
    let app = common::build_test_app(store.clone());
    post_json_with_headers(
        app,
        "/api/logs",
        json!({"type": "kill", "id": 999, "timestamp": "1999-01-01T00:00:00Z"}),
        &[KEY],
    )
    .await;

    let app = common::build_test_app(store);
    let json = body_json(get(app, "/api/logs").await).await;
    let entry = &json[0];
    assert_ne!(entry["id"], 999);
    assert_ne!(entry["timestamp"], "1999-01-01T00:00:00Z");
    assert_eq!(entry["type"], "kill");
}

#[tokio::test]
async fn list_filters_by_field_and_limits() {
    let store = seeded_store();
    for event in [
        json!({"type": "kill", "killer": "ABC123"}),
        json!({"type": "chat", "sender": "ABC123"}),
        json!({"type": "kill", "killer": "GHI789"}),
    ] {
        let app = common::build_test_app(store.clone());
        let response = post_json_with_headers(app, "/api/logs", event, &[KEY]).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(store.clone());
    let kills = body_json(get(app, "/api/logs?type=kill&order=asc").await).await;
    let killers: Vec<&str> = kills
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["killer"].as_str().unwrap())
        .collect();
    assert_eq!(killers, ["ABC123", "GHI789"]);

    let app = common::build_test_app(store);
    let limited = body_json(get(app, "/api/logs?limit=1").await).await;
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_rejects_bad_order() {
    let app = common::build_test_app(seeded_store());
    let response = get(app, "/api/logs?order=sideways").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn list_rejects_bad_filter_field() {
    let app = common::build_test_app(seeded_store());
    let response = get(app, "/api/logs?a.b=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
