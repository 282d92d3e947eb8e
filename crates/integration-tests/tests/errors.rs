//! Integration tests for the error taxonomy, via the /api/buggy probes.
//!
//! These tests require:
//! - The API server running (cargo run -p driftwood-api)
//!
//! Run with: cargo test -p driftwood-integration-tests -- --ignored

use driftwood_integration_tests::api_base_url;
use reqwest::StatusCode;
use serde_json::Value;

async fn probe(path: &str) -> (StatusCode, Value) {
    let resp = reqwest::get(format!("{}buggy/{path}", api_base_url()))
        .await
        .expect("Failed to reach probe");
    let status = resp.status();
    let body = resp.json().await.expect("probe body is not JSON");
    (status, body)
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_not_found_probe() {
    let (status, body) = probe("not-found").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["title"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_bad_request_probe() {
    let (status, body) = probe("bad-request").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "This is a bad request");
    assert!(body["errors"].is_null());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_unauthorised_probe() {
    let (status, body) = probe("unauthorised").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_validation_probe_carries_field_errors() {
    let (status, body) = probe("validation-error").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let errors = body["errors"].as_object().expect("errors map missing");
    assert_eq!(errors.len(), 2);
    assert!(errors.contains_key("problem1"));
    assert!(errors.contains_key("problem2"));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_server_error_probe_hides_details() {
    let (status, body) = probe("server-error").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // the internal message must not leak
    assert_eq!(body["title"], "Internal server error");
    assert!(!body.to_string().contains("probe"));
}
