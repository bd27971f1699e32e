//! Access token issuance and verification.
//!
//! Tokens are JWTs signed with the symmetric key from [`SigningConfig`].
//!
//! # Pre-conditions
//! - The `SigningConfig` was constructed successfully (non-empty secret,
//!   expiry of at least one second).
//! - Principals passed to `issue` carry a non-empty identifier and subject ID.
//!
//! # Post-conditions
//! - `issue` produces a token whose `exp` is exactly `iat + expiry`.
//! - `verify` only succeeds for tokens signed with the configured key and
//!   algorithm whose `exp` is strictly in the future.
//!
//! # Invariants
//! - Verification checks the signature first and expiry second; the expiry
//!   check is never skipped.
//! - Neither issuance nor verification touches shared mutable state.

use std::sync::Arc;

use futures::future::BoxFuture;
use jsonwebtoken::{Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::{AuthError, AuthenticatedPrincipal, SigningConfig};
use crate::time::{SystemTimeSource, TimeSource};

/// Claims embedded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The user's login identifier.
    #[serde(rename = "name")]
    pub identifier: String,
    /// The user's stable subject ID.
    #[serde(rename = "sub")]
    pub subject_id: String,
    /// Issued-at, seconds since Unix epoch.
    #[serde(rename = "iat")]
    pub issued_at: u64,
    /// Expiry, seconds since Unix epoch.
    #[serde(rename = "exp")]
    pub expires_at: u64,
    #[serde(
        rename = "username",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "username")]
    pub display_name: Option<String>,
}

/// Normalized caller identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    #[serde(rename = "user_id")]
    pub subject_id: String,
    #[serde(rename = "email")]
    pub identifier: String,
}

impl From<&TokenClaims> for VerifiedIdentity {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            subject_id: claims.subject_id.clone(),
            identifier: claims.identifier.clone(),
        }
    }
}

/// Extension point run after a token has passed signature and expiry checks.
///
/// A hook may reject the token (for example against a revocation list) by
/// returning `Err(reason)`, or enrich the identity by returning a modified one.
/// Hooks may perform I/O.
pub trait PostVerificationHook: Send + Sync {
    fn after_verify<'a>(
        &'a self,
        claims: &'a TokenClaims,
        identity: VerifiedIdentity,
    ) -> BoxFuture<'a, Result<VerifiedIdentity, String>>;
}

/// Signs access tokens for authenticated principals.
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<SigningConfig>,
    time_source: Arc<dyn TimeSource>,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    #[must_use]
    pub fn with_time_source(config: Arc<SigningConfig>, time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            time_source,
        }
    }

    /// Build the claims for `principal` as of `now`.
    #[must_use]
    pub fn claims_for(&self, principal: &AuthenticatedPrincipal, now: u64) -> TokenClaims {
        TokenClaims {
            identifier: principal.identifier.clone(),
            subject_id: principal.subject_id.clone(),
            issued_at: now,
            expires_at: now.saturating_add(self.config.expiry_secs()),
            display_name: principal.display_name.clone(),
        }
    }

    /// Issue a signed access token for `principal`.
    ///
    /// # Errors
    /// Returns `AuthError::IncompletePrincipal` if the principal has an empty
    /// identifier or subject ID. Returns `AuthError::Configuration` if the
    /// token cannot be signed with the configured key.
    pub fn issue(&self, principal: &AuthenticatedPrincipal) -> Result<IssuedToken, AuthError> {
        if principal.identifier.is_empty() || principal.subject_id.is_empty() {
            return Err(AuthError::IncompletePrincipal);
        }

        let claims = self.claims_for(principal, self.time_source.now_secs());
        let access_token = self.sign(&claims)?;

        tracing::debug!(
            subject_id = %claims.subject_id,
            expires_at = claims.expires_at,
            "issued access token"
        );

        Ok(IssuedToken {
            access_token,
            identifier: principal.identifier.clone(),
            display_name: principal.display_name.clone(),
        })
    }

    /// Sign arbitrary claims with the configured key.
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` if encoding fails.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let header = Header::new(self.config.algorithm().to_jwt());
        encode(&header, claims, self.config.encoding_key())
            .map_err(|e| AuthError::Configuration(e.to_string()))
    }
}

/// Verifies access tokens presented on inbound requests.
#[derive(Clone)]
pub struct TokenVerifier {
    config: Arc<SigningConfig>,
    time_source: Arc<dyn TimeSource>,
    validation: Validation,
    hook: Option<Arc<dyn PostVerificationHook>>,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    #[must_use]
    pub fn with_time_source(config: Arc<SigningConfig>, time_source: Arc<dyn TimeSource>) -> Self {
        let mut validation = Validation::new(config.algorithm().to_jwt());
        // Expiry is checked explicitly after the signature, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            time_source,
            validation,
            hook: None,
        }
    }

    /// Install a hook that runs after signature and expiry checks pass.
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn PostVerificationHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Check the signature and expiry of `token` and return its claims.
    ///
    /// Does not run the post-verification hook.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidSignature` if the token is malformed, its
    /// signature does not match, or its `sub` or `name` claim is empty. Returns `AuthError::TokenExpired` if the
    /// current time is at or past `exp`.
    pub fn decode_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data = decode::<TokenClaims>(token, self.config.decoding_key(), &self.validation)
            .map_err(|_| AuthError::InvalidSignature)?;
        let claims = token_data.claims;

        if claims.subject_id.is_empty() || claims.identifier.is_empty() {
            return Err(AuthError::InvalidSignature);
        }

        if self.time_source.now_secs() >= claims.expires_at {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Verify `token` and recover the caller's identity.
    ///
    /// # Errors
    /// Returns the errors of [`TokenVerifier::decode_claims`], or
    /// `AuthError::TokenRejected` if the post-verification hook refuses the token.
    pub async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let claims = self.decode_claims(token)?;
        let identity = VerifiedIdentity::from(&claims);

        match &self.hook {
            Some(hook) => hook
                .after_verify(&claims, identity)
                .await
                .map_err(AuthError::TokenRejected),
            None => Ok(identity),
        }
    }
}
