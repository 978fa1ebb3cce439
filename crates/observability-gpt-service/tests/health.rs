//! Health endpoint tests.

mod common;

use axum::http::StatusCode;
use common::{authorization, bearer, TestHarness};
use serde_json::Value;

#[tokio::test]
async fn health_returns_ok() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "observability-gpt");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_ignores_authorization() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/health")
        .add_header(authorization(), bearer("anything"))
        .await;

    response.assert_status(StatusCode::OK);
}
