//! Shared building blocks for the IAM key rotation jobs: the credential
//! document mirrored into each secret, the identity/secret store traits, and
//! their AWS-backed implementations.

pub mod aws;
pub mod identity;
pub mod record;
pub mod secrets;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use record::SecretRecord;
