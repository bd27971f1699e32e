//! Token signing configuration.
//!
//! # Pre-conditions
//! - The signing secret must be a non-empty byte string.
//! - The expiry duration must be at least one second.
//!
//! # Post-conditions
//! - `SigningConfig` instances are immutable once created.
//! - Encoding and decoding keys are derived once, at construction.
//!
//! # Invariants
//! - A constructed `SigningConfig` always holds usable key material.
//! - The raw secret is never exposed through `Debug`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

/// Error returned when signing configuration is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningConfigError {
    /// The signing secret is empty.
    EmptySecret,
    /// The algorithm name is not one of the supported HMAC algorithms.
    UnsupportedAlgorithm(String),
    /// The expiry duration is shorter than one second.
    ExpiryTooShort,
}

impl fmt::Display for SigningConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "signing secret must not be empty"),
            Self::UnsupportedAlgorithm(name) => {
                write!(f, "unsupported signing algorithm: {name}")
            }
            Self::ExpiryTooShort => write!(f, "token expiry must be at least one second"),
        }
    }
}

impl std::error::Error for SigningConfigError {}

/// Symmetric algorithms accepted for signing access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    /// HMAC-SHA256.
    #[default]
    Hs256,
    /// HMAC-SHA384.
    Hs384,
    /// HMAC-SHA512.
    Hs512,
}

impl SigningAlgorithm {
    /// The `alg` header value for this algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
        }
    }

    pub(crate) const fn to_jwt(self) -> Algorithm {
        match self {
            Self::Hs256 => Algorithm::HS256,
            Self::Hs384 => Algorithm::HS384,
            Self::Hs512 => Algorithm::HS512,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = SigningConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(Self::Hs256),
            "HS384" => Ok(Self::Hs384),
            "HS512" => Ok(Self::Hs512),
            _ => Err(SigningConfigError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Process-wide token signing configuration.
///
/// Built once at startup and shared by reference with the issuer and verifier.
#[derive(Clone)]
pub struct SigningConfig {
    algorithm: SigningAlgorithm,
    expiry: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningConfig {
    /// Create a new signing configuration.
    ///
    /// Only whole seconds of `expiry` are significant, since token timestamps
    /// are expressed in seconds.
    ///
    /// # Errors
    /// Returns `SigningConfigError::EmptySecret` if the secret is empty.
    /// Returns `SigningConfigError::ExpiryTooShort` if `expiry` is under one second.
    pub fn new(
        secret: &[u8],
        algorithm: SigningAlgorithm,
        expiry: Duration,
    ) -> Result<Self, SigningConfigError> {
        if secret.is_empty() {
            return Err(SigningConfigError::EmptySecret);
        }
        if expiry.as_secs() == 0 {
            return Err(SigningConfigError::ExpiryTooShort);
        }

        Ok(Self {
            algorithm,
            expiry,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// Create an HS256 configuration.
    ///
    /// # Errors
    /// Same as [`SigningConfig::new`].
    pub fn hs256(secret: &[u8], expiry: Duration) -> Result<Self, SigningConfigError> {
        Self::new(secret, SigningAlgorithm::Hs256, expiry)
    }

    #[must_use]
    pub const fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Token lifetime in whole seconds.
    #[must_use]
    pub const fn expiry_secs(&self) -> u64 {
        self.expiry.as_secs()
    }

    pub(crate) const fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) const fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("algorithm", &self.algorithm)
            .field("expiry", &self.expiry)
            .field("secret", &"<redacted>")
            .finish()
    }
}
