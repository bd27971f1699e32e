//! HTTP surface for login and authenticated requests.
//!
//! # Routes
//!
//! - `POST /auth/login`: body `{"email", "password"}`, returns an `IssuedToken`.
//! - `GET /profile`: requires `Authorization: Bearer <token>`, returns the
//!   caller's `VerifiedIdentity`.
//!
//! # Invariants
//!
//! - Every token failure produces the same `401` body; the specific reason is
//!   only visible in logs.
//! - Every credential failure produces the same `401` body, whether or not the
//!   identifier exists.

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::auth::{
    AuthError, AuthService, AuthorizationHeader, BearerTokenExtractor, Credential, IssuedToken,
    VerifiedIdentity,
};
use crate::user_store::UserStore;

/// Shared state for request handlers.
pub struct AppState<S> {
    pub auth: Arc<AuthService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
        }
    }
}

/// Build the application router.
pub fn router<S: UserStore + 'static>(auth: Arc<AuthService<S>>) -> Router {
    let state = AppState { auth };

    let protected = Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<S>,
        ));

    Router::new()
        .route("/auth/login", post(login::<S>))
        .merge(protected)
        .with_state(state)
}

async fn login<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(credential): Json<Credential>,
) -> Result<Json<IssuedToken>, AuthError> {
    state.auth.login(&credential).await.map(Json)
}

async fn profile(Extension(identity): Extension<VerifiedIdentity>) -> Json<VerifiedIdentity> {
    Json(identity)
}

/// Verify the bearer token and attach the caller's identity to the request.
async fn require_bearer<S: UserStore>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Owned so the request body is not borrowed across the await.
    let Some(token) = AuthorizationHeader
        .extract_bearer_token(request.headers())
        .map(str::to_owned)
    else {
        tracing::debug!("request without bearer token");
        return Err(AuthError::MissingToken);
    };

    let identity = state.auth.authenticate(&token).await?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = if self.is_token_failure() {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "unauthorized")
        } else if matches!(self, Self::InvalidCredentials) {
            (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "invalid credentials",
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "internal server error",
            )
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
