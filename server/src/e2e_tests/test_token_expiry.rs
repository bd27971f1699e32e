//! Test that expired tokens are refused and fresh ones are not.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::{EXPIRY_SECS, START_SECS, TestApp, unauthorized_body};

#[tokio::test]
async fn test_token_accepted_just_before_expiry() {
    let app = TestApp::new();
    let token = app.access_token("alice@example.com", "hunter2").await;

    app.clock.set(START_SECS + EXPIRY_SECS - 1);
    let (status, _body) = app.profile(Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_rejected_at_expiry() {
    let app = TestApp::new();
    let token = app.access_token("alice@example.com", "hunter2").await;

    app.clock.set(START_SECS + EXPIRY_SECS);
    let (status, body) = app.profile(Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized_body());
}

#[tokio::test]
async fn test_fresh_login_after_expiry() {
    let app = TestApp::new();
    let stale = app.access_token("alice@example.com", "hunter2").await;

    app.clock.advance(EXPIRY_SECS * 2);
    let fresh = app.access_token("alice@example.com", "hunter2").await;

    let (stale_status, _) = app.profile(Some(&format!("Bearer {stale}"))).await;
    let (fresh_status, _) = app.profile(Some(&format!("Bearer {fresh}"))).await;

    assert_eq!(stale_status, StatusCode::UNAUTHORIZED);
    assert_eq!(fresh_status, StatusCode::OK);
}
