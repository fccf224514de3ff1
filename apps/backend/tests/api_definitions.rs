//! Definition ranking API tests.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::fixtures;
use common::TestContext;

fn candidates() -> Vec<serde_json::Value> {
    vec![
        fixtures::definition(1, "a small domesticated dog"),
        fixtures::definition(2, "a small domesticated cat"),
        fixtures::definition(3, "a large wild animal that lives in forests"),
        fixtures::definition(4, "a domesticated cat"),
    ]
}

/// Test ranking keeps the closest definitions.
#[tokio::test]
async fn test_rank_keeps_closest() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/definitions/rank")
        .json(&json!({
            "candidates": candidates(),
            "reference": "a small domesticated cat",
            "k": 2,
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let mut indexes: Vec<u64> = body["definitions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["index"].as_u64().unwrap())
        .collect();
    indexes.sort();
    assert_eq!(indexes, vec![2, 4]);

    let formatted = body["formatted"].as_str().unwrap();
    assert!(formatted.contains("2. [noun] a small domesticated cat\n"));
    assert!(formatted.contains("4. [noun] a domesticated cat\n"));
    assert_eq!(formatted.lines().count(), 2);
}

/// Test the default top-k of three.
#[tokio::test]
async fn test_rank_defaults_to_three() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/definitions/rank")
        .json(&json!({ "candidates": candidates(), "reference": "a cat" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["definitions"].as_array().unwrap().len(), 3);
}

/// Test k larger than the candidate count returns everything.
#[tokio::test]
async fn test_rank_with_large_k() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/definitions/rank")
        .json(&json!({ "candidates": candidates(), "reference": "x", "k": 10 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["definitions"].as_array().unwrap().len(), 4);
}

/// Test k of zero is rejected.
#[tokio::test]
async fn test_rank_rejects_zero_k() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/definitions/rank")
        .json(&json!({ "candidates": candidates(), "reference": "x", "k": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
