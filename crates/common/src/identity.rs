//! Identity-service model: access keys, their two-state lifecycle, and the
//! store trait both jobs drive.
//!
//! The Active/Inactive lifecycle is made explicit here as [`KeyStatus`] purely
//! for clarity and testability; the source of truth remains the identity
//! service's own status field.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Status of an access key, as tracked by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// The key is usable for signing requests.
    Active,
    /// The key is disabled and awaiting deletion by a cleanup pass.
    Inactive,
}

impl KeyStatus {
    /// The identity service's literal status string.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyStatus::Active => "Active",
            KeyStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one existing access key, as returned by a key listing.
///
/// Listings never expose the secret half of a pair; that is only visible at
/// creation time via [`NewAccessKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMetadata {
    /// Public identifier of the key.
    pub access_key_id: String,
    /// User the key belongs to.
    pub user_name: String,
    /// Current status.
    pub status: KeyStatus,
}

/// A freshly created access key pair.
///
/// The secret half exists only in this value; the identity service never
/// returns it again. It must be written to the secret store before the value
/// is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccessKey {
    /// Public identifier of the new key.
    pub access_key_id: String,
    /// Secret half of the new pair.
    pub secret_access_key: String,
    /// User the key was created for.
    pub user_name: String,
}

impl fmt::Debug for NewAccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret half, not even in debug builds.
        f.debug_struct("NewAccessKey")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("user_name", &self.user_name)
            .finish()
    }
}

/// Errors produced by an identity store.
///
/// The jobs never branch on these variants; every error propagates unmodified
/// and aborts the remaining loop iterations of the invocation.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The named user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The named access key does not exist for the user.
    #[error("access key not found: {0}")]
    KeyNotFound(String),

    /// The service refused to create another key for the user.
    #[error("access key limit reached for user {0}")]
    KeyLimitReached(String),

    /// Any other identity-service failure.
    #[error("identity service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The identity-service operations the rotation cycle consumes.
///
/// Injected into each job handler so tests can substitute mocks or the
/// in-memory fakes from [`crate::testing`].
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// List every access key the user currently holds.
    async fn list_keys(&self, user_name: &str) -> Result<Vec<KeyMetadata>, IdentityError>;

    /// Create one new key pair for the user.
    async fn create_key(&self, user_name: &str) -> Result<NewAccessKey, IdentityError>;

    /// Set an existing key's status.
    async fn set_key_status(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: KeyStatus,
    ) -> Result<(), IdentityError>;

    /// Permanently delete a key. There is no undo.
    async fn delete_key(&self, user_name: &str, access_key_id: &str)
        -> Result<(), IdentityError>;
}
