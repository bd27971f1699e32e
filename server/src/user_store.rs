//! User lookup capability consumed by the credential validator.
//!
//! The auth core only ever reads user records; ownership and persistence of
//! those records belong to whatever implements [`UserStore`]. This module also
//! provides [`InMemoryUserStore`], a thread-safe map used by the binary and by
//! tests.
//!
//! # Thread Safety
//!
//! `InMemoryUserStore` uses `RwLock` so concurrent logins only take shared
//! read access; inserts take exclusive access.
//!
//! # Invariants
//!
//! - Each identifier maps to at most one `UserRecord`.
//! - Lookups never mutate the store.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::RwLock;

use crate::auth::UserRecord;

/// Lookup of user records by identifier.
///
/// Implementations must be safe to call concurrently. Timeouts are the
/// implementation's responsibility.
pub trait UserStore: Send + Sync {
    /// Store-specific failure. Surfaced to callers as an internal failure,
    /// never as invalid credentials.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find the record whose identifier equals `identifier` exactly.
    ///
    /// Returns `Ok(None)` when no such record exists.
    fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, Self::Error>> + Send;
}

/// Errors produced by [`InMemoryUserStore`].
#[derive(Debug)]
pub enum UserStoreError {
    /// The internal lock was poisoned by a panicking writer.
    LockPoisoned,
    /// The seed file could not be read.
    Io(std::io::Error),
    /// The seed file is not a JSON array of user records.
    Parse(serde_json::Error),
    /// Two records share an identifier.
    DuplicateIdentifier(String),
}

impl fmt::Display for UserStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LockPoisoned => write!(f, "user store lock poisoned"),
            Self::Io(e) => write!(f, "failed to read user file: {e}"),
            Self::Parse(e) => write!(f, "failed to parse user file: {e}"),
            Self::DuplicateIdentifier(identifier) => {
                write!(f, "duplicate user identifier: {identifier}")
            }
        }
    }
}

impl std::error::Error for UserStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::LockPoisoned | Self::DuplicateIdentifier(_) => None,
        }
    }
}

impl From<std::io::Error> for UserStoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for UserStoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// In-memory user store keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list of records.
    ///
    /// # Errors
    /// Returns `UserStoreError::DuplicateIdentifier` if two records share an identifier.
    pub fn from_records(
        records: impl IntoIterator<Item = UserRecord>,
    ) -> Result<Self, UserStoreError> {
        let mut users = HashMap::new();
        for record in records {
            if users.contains_key(&record.identifier) {
                return Err(UserStoreError::DuplicateIdentifier(record.identifier));
            }
            users.insert(record.identifier.clone(), record);
        }
        Ok(Self {
            users: RwLock::new(users),
        })
    }

    /// Load a store from a JSON file containing an array of user records.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// contains duplicate identifiers.
    pub fn from_json_file(path: &Path) -> Result<Self, UserStoreError> {
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<UserRecord> = serde_json::from_str(&contents)?;
        Self::from_records(records)
    }

    /// Insert or replace a record, returning the previous one if any.
    ///
    /// # Errors
    /// Returns `UserStoreError::LockPoisoned` if the lock is poisoned.
    pub fn insert(&self, record: UserRecord) -> Result<Option<UserRecord>, UserStoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserStoreError::LockPoisoned)?;
        Ok(users.insert(record.identifier.clone(), record))
    }

    /// Number of stored records.
    ///
    /// # Errors
    /// Returns `UserStoreError::LockPoisoned` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, UserStoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserStoreError::LockPoisoned)?;
        Ok(users.len())
    }

    /// Whether the store holds no records.
    ///
    /// # Errors
    /// Returns `UserStoreError::LockPoisoned` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, UserStoreError> {
        Ok(self.len()? == 0)
    }
}

impl UserStore for InMemoryUserStore {
    type Error = UserStoreError;

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, Self::Error> {
        let users = self
            .users
            .read()
            .map_err(|_| UserStoreError::LockPoisoned)?;
        Ok(users.get(identifier).cloned())
    }
}
