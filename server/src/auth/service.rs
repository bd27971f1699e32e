//! Login and request authentication, composed from the validator, issuer and
//! verifier.
//!
//! # Invariants
//! - A lookup failure is never reported as invalid credentials.
//! - Secrets and raw tokens are never logged.

use std::sync::Arc;

use super::{
    AuthError, Credential, CredentialValidator, IssuedToken, PostVerificationHook, SigningConfig,
    TokenIssuer, TokenVerifier, VerifiedIdentity,
};
use crate::time::{SystemTimeSource, TimeSource};
use crate::user_store::UserStore;

/// Entry point for the login and authenticated-request flows.
pub struct AuthService<S> {
    validator: CredentialValidator<S>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl<S: UserStore> AuthService<S> {
    #[must_use]
    pub fn new(store: Arc<S>, config: Arc<SigningConfig>) -> Self {
        Self::with_time_source(store, config, Arc::new(SystemTimeSource))
    }

    #[must_use]
    pub fn with_time_source(
        store: Arc<S>,
        config: Arc<SigningConfig>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            validator: CredentialValidator::new(store),
            issuer: TokenIssuer::with_time_source(Arc::clone(&config), Arc::clone(&time_source)),
            verifier: TokenVerifier::with_time_source(config, time_source),
        }
    }

    /// Install a post-verification hook on the verifier.
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn PostVerificationHook>) -> Self {
        self.verifier = self.verifier.with_hook(hook);
        self
    }

    /// Validate `credential` and issue an access token.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` for an unknown identifier or a
    /// wrong secret, `AuthError::InternalLookupFailure` if the user store
    /// fails, `AuthError::IncompletePrincipal` if the stored record has no
    /// identifier or subject ID, and `AuthError::Configuration` if signing fails.
    pub async fn login(&self, credential: &Credential) -> Result<IssuedToken, AuthError> {
        let principal = self
            .validator
            .validate(&credential.identifier, &credential.secret)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user store lookup failed during login");
                AuthError::InternalLookupFailure(Box::new(e))
            })?;

        let Some(principal) = principal else {
            tracing::info!(identifier = %credential.identifier, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let issued = self.issuer.issue(&principal)?;
        tracing::info!(subject_id = %principal.subject_id, "login succeeded");
        Ok(issued)
    }

    /// Verify a bearer token presented on an inbound request.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidSignature`, `AuthError::TokenExpired`, or
    /// `AuthError::TokenRejected`.
    pub async fn authenticate(&self, raw_token: &str) -> Result<VerifiedIdentity, AuthError> {
        self.verifier.verify(raw_token).await.inspect_err(|e| {
            tracing::info!(reason = e.kind(), "bearer token rejected");
        })
    }
}
