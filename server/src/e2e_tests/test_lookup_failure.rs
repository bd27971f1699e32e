//! Test that a failing user store is reported as an internal error, not as
//! invalid credentials.

use axum::http::StatusCode;
use serde_json::json;

use crate::auth::UserRecord;
use crate::e2e_tests::helpers::TestApp;
use crate::user_store::{UserStore, UserStoreError};

struct OfflineStore;

impl UserStore for OfflineStore {
    type Error = UserStoreError;

    async fn find_by_identifier(
        &self,
        _identifier: &str,
    ) -> Result<Option<UserRecord>, Self::Error> {
        Err(UserStoreError::Io(std::io::Error::other("store offline")))
    }
}

#[tokio::test]
async fn test_lookup_failure_returns_internal_error() {
    let app = TestApp::with_store(OfflineStore);

    let (status, body) = app.login("alice@example.com", "hunter2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": { "code": "INTERNAL", "message": "internal server error" } })
    );
}
