//! Authentication module.
//!
//! Credential validation, access token issuance, and bearer token
//! verification for stateless request authentication.
//!
//! # Pre-conditions
//! - A `SigningConfig` has been constructed at startup.
//!
//! # Post-conditions
//! - Verified requests carry a `VerifiedIdentity` recovered purely from the token.
//!
//! # Invariants
//! - No server-side session state is created or consulted.

pub mod bearer;
pub mod error;
pub mod principal;
pub mod service;
pub mod signing_config;
pub mod token;
pub mod validator;

pub use bearer::{AuthorizationHeader, BearerTokenExtractor, parse_bearer};
pub use error::{AuthError, LookupError};
pub use principal::{Attributes, AuthenticatedPrincipal, Credential, UserRecord};
pub use service::AuthService;
pub use signing_config::{SigningAlgorithm, SigningConfig, SigningConfigError};
pub use token::{
    IssuedToken, PostVerificationHook, TokenClaims, TokenIssuer, TokenVerifier, VerifiedIdentity,
};
pub use validator::CredentialValidator;
