//! Server configuration module.
//!
//! This module provides configuration loading for the auth server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `AUTH_JWT_SECRET`: Secret used to sign and verify access tokens (required)
//! - `AUTH_JWT_ALGORITHM`: `HS256`, `HS384` or `HS512` (default: `HS256`)
//! - `AUTH_TOKEN_EXPIRY_SECS`: Access token lifetime in seconds (default: `60`)
//! - `AUTH_LISTEN_PORT`: Port to listen on (default: `3000`)
//! - `AUTH_USERS_FILE`: JSON file of user records to seed the user store (optional)
//!
//! # Invariants
//!
//! - `signing` always holds a usable, non-empty key
//! - `listen_port` is always a valid port number

use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{SigningAlgorithm, SigningConfig};

const JWT_SECRET: &str = "AUTH_JWT_SECRET";
const JWT_ALGORITHM: &str = "AUTH_JWT_ALGORITHM";
const TOKEN_EXPIRY_SECS: &str = "AUTH_TOKEN_EXPIRY_SECS";
const LISTEN_PORT: &str = "AUTH_LISTEN_PORT";
const USERS_FILE: &str = "AUTH_USERS_FILE";

/// Server configuration.
///
/// # Post-conditions
///
/// - Any `ServerConfig` returned by `from_env()` or `from_lookup()` has a
///   valid signing configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Token signing key, algorithm and expiry.
    pub signing: SigningConfig,
    /// Port to listen on for HTTP requests.
    pub listen_port: u16,
    /// Optional seed file for the in-memory user store.
    pub users_file: Option<PathBuf>,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default access token lifetime in seconds.
    pub const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 60;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `AUTH_JWT_SECRET` is not set or is empty
    /// - `AUTH_JWT_ALGORITHM` names an unsupported algorithm
    /// - `AUTH_TOKEN_EXPIRY_SECS` is set but not a positive integer
    /// - `AUTH_LISTEN_PORT` is set but not a valid port number
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name: &str| std::env::var(name).ok())
    }

    /// Load configuration using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret =
            lookup(JWT_SECRET).ok_or_else(|| ConfigError::MissingEnvVar(JWT_SECRET.to_string()))?;
        let algorithm = Self::load_algorithm(lookup(JWT_ALGORITHM))?;
        let expiry = Self::load_expiry(lookup(TOKEN_EXPIRY_SECS))?;
        let listen_port = Self::load_listen_port(lookup(LISTEN_PORT))?;
        let users_file = lookup(USERS_FILE)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let signing = SigningConfig::new(secret.as_bytes(), algorithm, expiry).map_err(|e| {
            ConfigError::InvalidValue {
                name: JWT_SECRET.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            signing,
            listen_port,
            users_file,
        })
    }

    /// Parse the signing algorithm, defaulting to HS256.
    fn load_algorithm(value: Option<String>) -> Result<SigningAlgorithm, ConfigError> {
        match value {
            Some(value) => value.parse().map_err(|e: crate::auth::SigningConfigError| {
                ConfigError::InvalidValue {
                    name: JWT_ALGORITHM.to_string(),
                    message: e.to_string(),
                }
            }),
            None => Ok(SigningAlgorithm::default()),
        }
    }

    /// Parse the token lifetime, defaulting to one minute.
    fn load_expiry(value: Option<String>) -> Result<Duration, ConfigError> {
        let Some(value) = value else {
            return Ok(Duration::from_secs(Self::DEFAULT_TOKEN_EXPIRY_SECS));
        };

        match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::InvalidValue {
                name: TOKEN_EXPIRY_SECS.to_string(),
                message: format!("'{value}' is not a positive number of seconds"),
            }),
        }
    }

    /// Parse the listen port, defaulting to 3000.
    fn load_listen_port(value: Option<String>) -> Result<u16, ConfigError> {
        match value {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: LISTEN_PORT.to_string(),
                message: format!("'{value}' is not a valid port number (must be 1-65535)"),
            }),
            None => Ok(Self::DEFAULT_PORT),
        }
    }
}
