//! `rotate-keys` — phase one of the rotation cycle.
//!
//! For each configured secret, the job demotes every active access key of the
//! owning user, creates one replacement pair, and overwrites the secret with
//! the new credentials. The superseded keys stay inactive until the
//! `cleanup-keys` job purges them on a later schedule tick.

pub mod config;
pub mod handler;
pub mod telemetry;
