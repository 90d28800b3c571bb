//! AWS-backed implementations of the identity and secret store traits.
//!
//! Both scheduled jobs build one [`AwsClients`] bundle per process and hand
//! each client to the matching store implementation. IAM plays the identity
//! service; Secrets Manager plays the secret service.

pub mod clients;
pub mod identity;
pub mod secrets;

pub use clients::AwsClients;
pub use identity::IamIdentityStore;
pub use secrets::SecretsManagerStore;
