//! Router tests over the in-memory registry, no socket (multi-file to keep
//! each file focused).

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use dls_core::config::DriverConfig;
use dls_core::records::RecordDb;

use crate::routes;
use crate::state::AppState;


/// Unroutable loopback source: the probe fails fast and creation falls back
/// to the configured default size.
const TEST_SOURCE: &str = "http://127.0.0.1:9/files/test-archive.zip";

fn fast_cfg() -> DriverConfig {
    DriverConfig {
        step_percent: 5.0,
        tick_ms: 2,
        verify_delay_ms: 2,
        post_verify_delay_ms: 2,
        extract_delay_ms: 2,
        install_delay_ms: 2,
        finalize_delay_ms: 2,
        default_total_size: 1_000_000,
        list_limit: 100,
    }
}

async fn test_app_with(cfg: DriverConfig) -> (Router, AppState) {
    let db = RecordDb::open_memory().await.unwrap();
    let state = AppState::new(db, cfg);
    (routes::router(state.clone()), state)
}

async fn test_app() -> (Router, AppState) {
    test_app_with(fast_cfg()).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Create a download and return its record body.
async fn create_download(app: &Router) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/downloads",
        Some(json!({ "source_url": TEST_SOURCE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

/// Poll the record until its status matches (or panic after the deadline).
async fn wait_for_status(app: &Router, id: &str, want: &str) -> Value {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let (status, body) = send_json(app, "GET", &format!("/api/downloads/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        if body["status"] == want {
            return body;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {want}; last {}",
            body["status"]
        );
        tokio::time::sleep(Duration::from_millis(4)).await;
    }
}
