//! Search proxy and health integration tests.
//!
//! Run with: `cargo test -p medley-api --test search_test`
//!
//! The test config points the search function at an unroutable address, so
//! these tests exercise the failure path of the proxy. The success path is
//! a plain body pass-through with nothing of ours to assert.

mod helpers;

use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_search_upstream_failure_is_opaque_500() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/search")
        .add_query_param("q", "sunset")
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Search failed");
    // Upstream errors never leak connection details to the caller.
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_search_without_query_still_proxies() {
    let app = setup_test_app().await;

    // No query string at all: the proxy calls the bare function URL.
    let response = app.client().get("/search").await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Search failed");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
