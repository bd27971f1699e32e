//! Test the login endpoint.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::{TestApp, json_request};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();

    let (status, body) = app.login("alice@example.com", "hunter2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["username"], "alice");
    let token = body["access_token"].as_str().expect("token string");
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_without_display_name() {
    let app = TestApp::new();

    let (status, body) = app.login("bob@example.com", "correct horse").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "bob@example.com");
    assert_eq!(body["username"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();

    let (status, body) = app.login("alice@example.com", "wrong").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "error": { "code": "INVALID_CREDENTIALS", "message": "invalid credentials" } })
    );
}

#[tokio::test]
async fn test_unknown_user_indistinguishable_from_wrong_password() {
    let app = TestApp::new();

    let wrong_password = app.login("alice@example.com", "wrong").await;
    let unknown_user = app.login("nobody@example.com", "hunter2").await;

    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = TestApp::new();

    let (status, _body) = app
        .send(json_request(
            "/auth/login",
            &json!({ "email": "alice@example.com" }),
        ))
        .await;

    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_does_not_echo_secret() {
    let app = TestApp::new();

    let (_status, body) = app.login("alice@example.com", "hunter2").await;

    assert!(!body.to_string().contains("hunter2"));
}
