//! Identity records flowing through the login path.
//!
//! # Invariants
//! - `AuthenticatedPrincipal` has no secret field; it can only be produced from
//!   a `UserRecord` by dropping the secret.
//! - `Debug` output of `Credential` and `UserRecord` never contains the secret.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, store-specific attributes carried alongside a user record.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Credentials submitted with a single login attempt. Never persisted.
#[derive(Clone, Deserialize)]
pub struct Credential {
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credential {
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// A user as held by the user store.
///
/// The field names on the wire match the seed-file format:
/// `email`, `password`, `user_id`, `username`, plus any extra attributes.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "email")]
    pub identifier: String,
    /// Stored form of the secret, compared by exact equality.
    #[serde(rename = "password")]
    pub secret: String,
    #[serde(rename = "user_id")]
    pub subject_id: String,
    #[serde(rename = "username", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl UserRecord {
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        secret: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            subject_id: subject_id.into(),
            display_name: None,
            attributes: Attributes::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Consume the record, discarding the secret.
    #[must_use]
    pub fn into_principal(self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal {
            identifier: self.identifier,
            subject_id: self.subject_id,
            display_name: self.display_name,
            attributes: self.attributes,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("subject_id", &self.subject_id)
            .field("display_name", &self.display_name)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// A user whose credentials have just been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedPrincipal {
    pub identifier: String,
    pub subject_id: String,
    pub display_name: Option<String>,
    pub attributes: Attributes,
}
