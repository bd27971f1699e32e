//! Authentication failure taxonomy.
//!
//! Every request-time failure is surfaced to the caller as one of these
//! variants; none are retried or swallowed inside the auth core. The HTTP
//! layer collapses them into generic responses so that error granularity
//! cannot reveal whether an account exists.

use std::fmt;

/// Boxed error returned by a user-store collaborator.
pub type LookupError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by login and token verification.
#[derive(Debug)]
pub enum AuthError {
    /// Unknown identifier or wrong secret. The two cases are indistinguishable.
    InvalidCredentials,
    /// The user-store lookup failed.
    InternalLookupFailure(LookupError),
    /// No bearer token was presented with the request.
    MissingToken,
    /// The token is malformed, tampered with, or signed with another key.
    InvalidSignature,
    /// The token is well-formed and validly signed but past its expiry.
    TokenExpired,
    /// A post-verification hook refused the token.
    TokenRejected(String),
    /// The principal handed to the issuer has an empty identifier or subject ID.
    IncompletePrincipal,
    /// The signing configuration could not be used.
    Configuration(String),
}

impl AuthError {
    /// Short, stable name of the failure kind for telemetry.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::InternalLookupFailure(_) => "internal_lookup_failure",
            Self::MissingToken => "missing_token",
            Self::InvalidSignature => "invalid_signature",
            Self::TokenExpired => "token_expired",
            Self::TokenRejected(_) => "token_rejected",
            Self::IncompletePrincipal => "incomplete_principal",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Whether this failure means the presented bearer token was not accepted.
    #[must_use]
    pub const fn is_token_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::InvalidSignature | Self::TokenExpired | Self::TokenRejected(_)
        )
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::InternalLookupFailure(e) => write!(f, "user lookup failed: {e}"),
            Self::MissingToken => write!(f, "missing bearer token"),
            Self::InvalidSignature => write!(f, "invalid token signature"),
            Self::TokenExpired => write!(f, "token has expired"),
            Self::TokenRejected(reason) => write!(f, "token rejected: {reason}"),
            Self::IncompletePrincipal => {
                write!(f, "principal is missing an identifier or subject id")
            }
            Self::Configuration(reason) => write!(f, "signing configuration error: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InternalLookupFailure(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
