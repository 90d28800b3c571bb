//! Secret-service trait: fetch and overwrite opaque string payloads by
//! identifier.
//!
//! Secrets are provisioned outside the rotation jobs; the jobs only read the
//! current value and, during rotation, replace it wholesale. Neither job ever
//! creates or deletes a secret.

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced by a secret store.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    /// No secret exists under the identifier.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The secret exists but holds no string value (e.g. binary-only).
    #[error("secret {0} holds no string value")]
    NoStringValue(String),

    /// Any other secret-service failure.
    #[error("secret service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The secret-service operations the rotation cycle consumes.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret's current string value.
    async fn get(&self, secret_id: &str) -> Result<String, SecretStoreError>;

    /// Overwrite the secret's string value in place (full replace, not a
    /// merge).
    async fn put(&self, secret_id: &str, value: &str) -> Result<(), SecretStoreError>;
}
