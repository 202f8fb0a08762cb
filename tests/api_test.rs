//! HTTP tests that run without a database
//!
//! Routing, authentication, role guards and request validation all happen
//! before the first query, so they are observable with `DATABASE_URL` unset.
//! Data access then answers 503.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{assert_error, assert_json_error, generate_test_token, test_app};
use pathmatch::backend::auth::sessions::{create_token, TokenKind};
use pathmatch::shared::Role;

fn token_for(role: Role) -> String {
    generate_test_token(Uuid::new_v4(), "someone@example.com", role)
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app(None);
    let response = app.server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({"status": "OK", "message": "Server is running"}));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = test_app(None);
    let response = app.server.get("/api/does-not-exist").await;
    assert_error(&response, StatusCode::NOT_FOUND, "Route not found");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app(None);
    let id = Uuid::new_v4();

    for path in [
        format!("/api/employers/{}", id),
        format!("/api/job-seekers/{}/applications", id),
        "/api/messages/conversations".to_string(),
        "/api/users/alice/followers".to_string(),
        "/api/content/creator/stats".to_string(),
    ] {
        let response = app.server.get(&path).await;
        assert_error(
            &response,
            StatusCode::UNAUTHORIZED,
            "No authentication token provided.",
        );
    }
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = test_app(None);
    let response = app
        .server
        .get("/api/auth/me")
        .authorization_bearer("not-a-jwt")
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Invalid authentication token.");
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = test_app(None);
    let refresh = create_token(Uuid::new_v4(), "a@example.com", Role::User, TokenKind::Refresh)
        .expect("token");

    let response = app
        .server
        .get("/api/messages/unread")
        .authorization_bearer(&refresh)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let app = test_app(None);
    let response = app
        .server
        .post("/api/auth/refresh")
        .authorization_bearer(&token_for(Role::JobSeeker))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_data_routes_without_database() {
    let app = test_app(None);

    let response = app.server.get("/api/jobs").await;
    assert_error(&response, StatusCode::SERVICE_UNAVAILABLE, "Database not configured");

    let response = app
        .server
        .get("/api/messages/unread")
        .authorization_bearer(&token_for(Role::User))
        .await;
    assert_error(&response, StatusCode::SERVICE_UNAVAILABLE, "Database not configured");

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({"email": "x@example.com", "password": "password123", "role": "user"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_role_guards() {
    let app = test_app(None);

    let response = app
        .server
        .post("/api/jobs")
        .authorization_bearer(&token_for(Role::JobSeeker))
        .json(&json!({"title": "Engineer", "description": "Build things"}))
        .await;
    assert_error(
        &response,
        StatusCode::FORBIDDEN,
        "Access denied. This endpoint requires employer role.",
    );

    let response = app
        .server
        .get("/api/content/subscriber/feed")
        .authorization_bearer(&token_for(Role::Creator))
        .await;
    assert_error(
        &response,
        StatusCode::FORBIDDEN,
        "Access denied. This endpoint requires user role.",
    );
}

#[tokio::test]
async fn test_unverified_creator_cannot_upload() {
    let app = test_app(None);
    let form = MultipartForm::new().add_text("title", "First video").add_part(
        "video",
        Part::bytes(vec![0u8; 16])
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    );

    let response = app
        .server
        .post("/api/content/upload")
        .authorization_bearer(&token_for(Role::Creator))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_validation_before_database() {
    let app = test_app(None);

    let response = app
        .server
        .post(&format!("/api/interactions/posts/{}/comments", Uuid::new_v4()))
        .authorization_bearer(&token_for(Role::User))
        .json(&json!({"content": "   "}))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Comment content is required");

    let me = Uuid::new_v4();
    let response = app
        .server
        .post("/api/messages/conversations")
        .authorization_bearer(&generate_test_token(me, "me@example.com", Role::User))
        .json(&json!({"participant_id": me}))
        .await;
    assert_error(
        &response,
        StatusCode::BAD_REQUEST,
        "Cannot start a conversation with yourself",
    );
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let app = test_app(None);
    let user = token_for(Role::User);

    let response = app
        .server
        .post("/api/messages/messages")
        .authorization_bearer(&user)
        .json(&json!({"content": "hi"}))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "conversation_id is required");

    let response = app
        .server
        .post("/api/messages/conversations")
        .authorization_bearer(&user)
        .json(&json!({"participant_id": "nope"}))
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/jobs")
        .authorization_bearer(&token_for(Role::Employer))
        .text("{")
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);

    let response = app.server.get("/api/content/posts/not-a-uuid").await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .get("/api/employers/42")
        .authorization_bearer(&token_for(Role::Employer))
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);

    let response = app.server.get("/api/jobs?limit=many").await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/applications/public")
        .json(&json!({"job_id": Uuid::new_v4()}))
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_huge_page_numbers_do_not_panic() {
    let app = test_app(None);

    let response = app
        .server
        .get(&format!("/api/content/creator/alice/posts?page={}&limit=50", i64::MAX))
        .await;
    assert_error(&response, StatusCode::SERVICE_UNAVAILABLE, "Database not configured");

    let response = app
        .server
        .get(&format!("/api/content/creator/alice/posts?page={}0", i64::MAX))
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}
