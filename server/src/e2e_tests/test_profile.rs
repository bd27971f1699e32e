//! Test bearer-authenticated access to the profile endpoint.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::{TestApp, unauthorized_body};

#[tokio::test]
async fn test_profile_with_valid_token() {
    let app = TestApp::new();
    let token = app.access_token("alice@example.com", "hunter2").await;

    let (status, body) = app.profile(Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "user_id": "user-alice", "email": "alice@example.com" })
    );
}

#[tokio::test]
async fn test_profile_scheme_is_case_insensitive() {
    let app = TestApp::new();
    let token = app.access_token("bob@example.com", "correct horse").await;

    let (status, body) = app.profile(Some(&format!("bearer {token}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "user-bob");
}

#[tokio::test]
async fn test_profile_without_token() {
    let app = TestApp::new();

    let (status, body) = app.profile(None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized_body());
}

#[tokio::test]
async fn test_profile_with_wrong_scheme() {
    let app = TestApp::new();
    let token = app.access_token("alice@example.com", "hunter2").await;

    let (status, body) = app.profile(Some(&format!("Token {token}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized_body());
}

#[tokio::test]
async fn test_profile_with_garbage_token() {
    let app = TestApp::new();

    let (status, body) = app.profile(Some("Bearer not-a-token")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized_body());
}

#[tokio::test]
async fn test_profile_with_forged_payload() {
    let app = TestApp::new();
    let alice = app.access_token("alice@example.com", "hunter2").await;
    let bob = app.access_token("bob@example.com", "correct horse").await;

    // Bob's claims under Alice's signature.
    let alice_parts: Vec<&str> = alice.split('.').collect();
    let bob_parts: Vec<&str> = bob.split('.').collect();
    let forged = format!("{}.{}.{}", alice_parts[0], bob_parts[1], alice_parts[2]);

    let (status, body) = app.profile(Some(&format!("Bearer {forged}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized_body());
}
