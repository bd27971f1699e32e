//! Common helpers for end-to-end tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::auth::{AuthService, SigningConfig};
use crate::http::router;
use crate::testing::{ManualTimeSource, alice_store};
use crate::user_store::UserStore;

/// Fixed starting time for the test clock (November 2023).
pub const START_SECS: u64 = 1_700_000_000;

/// Token lifetime used by test apps.
pub const EXPIRY_SECS: u64 = 60;

/// A router wired to a manual clock.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualTimeSource>,
}

impl TestApp {
    /// App backed by the alice/bob store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(alice_store())
    }

    /// App backed by an arbitrary store.
    #[allow(clippy::expect_used)]
    pub fn with_store<S: UserStore + 'static>(store: S) -> Self {
        let clock = Arc::new(ManualTimeSource::new(START_SECS));
        let signing = SigningConfig::hs256(b"e2e-test-secret", Duration::from_secs(EXPIRY_SECS))
            .expect("valid signing config");
        let auth = AuthService::with_time_source(
            Arc::new(store),
            Arc::new(signing),
            Arc::clone(&clock) as Arc<dyn crate::time::TimeSource>,
        );

        Self {
            router: router(Arc::new(auth)),
            clock,
        }
    }

    /// Send a request and return the status and JSON body.
    #[allow(clippy::expect_used)]
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    /// POST /auth/login with the given credentials.
    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(json_request(
            "/auth/login",
            &json!({ "email": email, "password": password }),
        ))
        .await
    }

    /// Log in and return the access token, panicking on failure.
    pub async fn access_token(&self, email: &str, password: &str) -> String {
        let (status, body) = self.login(email, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| panic!("no access_token in {body}"))
    }

    /// GET /profile with an optional raw `Authorization` header value.
    pub async fn profile(&self, authorization: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::get("/profile");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        #[allow(clippy::expect_used)]
        let request = builder.body(Body::empty()).expect("valid request");
        self.send(request).await
    }
}

/// Build a JSON POST request.
#[allow(clippy::expect_used)]
pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// The body every rejected bearer token receives.
pub fn unauthorized_body() -> Value {
    json!({ "error": { "code": "UNAUTHORIZED", "message": "unauthorized" } })
}
