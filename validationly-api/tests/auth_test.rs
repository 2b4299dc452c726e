mod common;

use axum::http::StatusCode;
use common::{json_request, send, setup_test_app};
use serde_json::json;
use validationly_app::domain::Plan;

#[tokio::test]
async fn test_issue_token_round_trip() {
    let app = setup_test_app();

    let (status, body) = send(
        &app.router,
        json_request(
            "POST",
            "/api/auth/issue-token",
            &json!({"email": "founder@example.com", "userId": 42}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    let claims = app.tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.id, "42");
    assert_eq!(claims.email, "founder@example.com");
    assert_eq!(claims.plan, Plan::Free);
}

#[tokio::test]
async fn test_issue_token_requires_both_fields() {
    let app = setup_test_app();

    let (status, body) = send(
        &app.router,
        json_request("POST", "/api/auth/issue-token", &json!({"email": "founder@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email and userId are required");
}

#[tokio::test]
async fn test_start_trial_persists_user() {
    let app = setup_test_app();

    let (status, body) = send(
        &app.router,
        json_request("POST", "/api/auth/start-trial", &json!({"email": "trial@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let user = &body["user"];
    assert_eq!(user["email"], "trial@example.com");
    assert_eq!(user["plan"], "free");
    assert_eq!(user["trialDaysLeft"], 7);

    let user_id = user["id"].as_str().unwrap();
    assert!(user_id.starts_with("user_"));
    let stored = app.users.get_user(user_id).unwrap();
    assert_eq!(stored.email, "trial@example.com");

    let claims = app.tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.id, user_id);
    assert!(claims.trial_end_date.is_some());
}

#[tokio::test]
async fn test_start_trial_rejects_invalid_email() {
    let app = setup_test_app();

    let (status, body) = send(
        &app.router,
        json_request("POST", "/api/auth/start-trial", &json!({"email": "nobody"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Valid email is required");
    assert!(app.users.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = setup_test_app();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/start-trial")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON body");
}
