//! Credential validation.
//!
//! # Post-conditions
//! - On success, returns the matching user with the secret stripped.
//! - An unknown identifier and a wrong secret both yield `Ok(None)`.
//! - User-store failures are returned unchanged as `Err`.
//!
//! # Invariants
//! - Validation performs exactly one read-only lookup and nothing else.

use std::sync::Arc;

use crate::auth::AuthenticatedPrincipal;
use crate::user_store::UserStore;

/// Checks submitted credentials against a [`UserStore`].
pub struct CredentialValidator<S> {
    store: Arc<S>,
}

impl<S: UserStore> CredentialValidator<S> {
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate an identifier/secret pair.
    ///
    /// The stored secret is compared by exact equality. No format validation
    /// is applied to either input.
    ///
    /// # Errors
    /// Returns the store's error if the lookup fails.
    pub async fn validate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Option<AuthenticatedPrincipal>, S::Error> {
        let Some(record) = self.store.find_by_identifier(identifier).await? else {
            return Ok(None);
        };

        if !secrets_match(secret.as_bytes(), record.secret.as_bytes()) {
            return Ok(None);
        }

        Ok(Some(record.into_principal()))
    }
}

/// Exact byte equality.
///
/// Inputs of equal length are compared in full without an early exit. A
/// length mismatch returns immediately, so the length of the stored secret is
/// not hidden. The fold is not guaranteed to stay branch-free after
/// optimization.
fn secrets_match(provided: &[u8], stored: &[u8]) -> bool {
    if provided.len() != stored.len() {
        return false;
    }
    provided
        .iter()
        .zip(stored)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
