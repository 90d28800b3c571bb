//! `cleanup-keys` — phase two of the access-key rotation cycle.
//!
//! The rotate-keys job demotes old keys to `Inactive` rather than deleting
//! them, so consumers still reading the previous credentials keep working
//! until they pick up the new secret value. This job runs later on its own
//! schedule and deletes whatever inactive keys the grace period left behind.

pub mod config;
pub mod handler;
pub mod telemetry;
