//! HTTP tests for the review endpoints that reject requests before any
//! statement is sent to storage.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_is_up_without_storage() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_bulk_with_empty_ids_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/reviews/bulk",
            Some(json!({ "action": "approve", "review_ids": [] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_REQUEST");
    assert_eq!(response.body["subject"], "review_ids");
}

#[tokio::test]
async fn test_bulk_with_missing_ids_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/reviews/bulk", Some(json!({ "action": "delete" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["subject"], "review_ids");
}

#[tokio::test]
async fn test_bulk_with_unknown_action_names_it() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/reviews/bulk",
            Some(json!({ "action": "archive", "review_ids": [1, 2] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_REQUEST");
    assert_eq!(response.body["subject"], "archive");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("archive")
    );
}

#[tokio::test]
async fn test_bulk_reports_unknown_action_before_bad_ids() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/reviews/bulk",
            Some(json!({ "action": "archive", "review_ids": [0] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["subject"], "archive");
}

#[tokio::test]
async fn test_bulk_with_missing_action_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/reviews/bulk", Some(json!({ "review_ids": [1] })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["subject"], "action");
}

#[tokio::test]
async fn test_bulk_over_configured_cap_is_bad_request() {
    let app = helpers::TestApp::new().await;
    let ids: Vec<i64> = (1..=1_001).collect();

    let response = app
        .request(
            "POST",
            "/api/reviews/bulk",
            Some(json!({ "action": "approve", "review_ids": ids })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["subject"], "review_ids");
}

#[tokio::test]
async fn test_bulk_with_negative_id_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/reviews/bulk",
            Some(json!({ "action": "approve", "review_ids": [4, -1] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["subject"], "review_ids");
}

#[tokio::test]
async fn test_invalid_vehicle_id_is_bad_request() {
    let app = helpers::TestApp::new().await;

    for path in ["/api/reviews/stats/abc", "/api/reviews/sentiment/0"] {
        let response = app.request("GET", path, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.body["subject"], "inv_id", "{path}");
    }
}

#[tokio::test]
async fn test_blank_make_comparison_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/reviews/compare/%20", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["subject"], "make");
}
