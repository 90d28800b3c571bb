//! Configuration loading and validation for the rotation job.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message, before any AWS call is made, if the
//! secret list is missing or empty.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated rotation job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Semicolon-delimited list of secret identifiers (names or ARNs), one
    /// per managed user. **Required.**
    pub secrets: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SECRETS` is absent or names no secret.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build rotate-keys configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise rotate-keys configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The configured secret identifiers, in listed order.
    ///
    /// Entries are trimmed; empty segments from stray delimiters are dropped.
    pub fn secret_ids(&self) -> Vec<String> {
        self.secrets
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.secret_ids().is_empty() {
            anyhow::bail!("SECRETS must list at least one secret identifier");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(secrets: &str) -> Config {
        Config {
            secrets: secrets.into(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn splits_on_semicolons() {
        let cfg = config_with("prod/alice;prod/bob");
        assert_eq!(cfg.secret_ids(), vec!["prod/alice", "prod/bob"]);
    }

    #[test]
    fn trims_entries_and_drops_empty_segments() {
        let cfg = config_with(" prod/alice ;; prod/bob ;");
        assert_eq!(cfg.secret_ids(), vec!["prod/alice", "prod/bob"]);
    }

    #[test]
    fn single_entry_without_delimiter() {
        let cfg = config_with("prod/alice");
        assert_eq!(cfg.secret_ids(), vec!["prod/alice"]);
    }

    #[test]
    fn absent_secret_list_fails_deserialisation() {
        // No sources, as when SECRETS is not set in the environment.
        let empty = config::Config::builder().build().unwrap();
        assert!(empty.try_deserialize::<Config>().is_err());
    }

    #[test]
    fn validate_rejects_empty_list() {
        assert!(config_with("").validate().is_err());
        assert!(config_with("  ").validate().is_err());
        assert!(config_with(";;").validate().is_err());
    }

    #[test]
    fn validate_accepts_populated_list() {
        assert!(config_with("prod/alice").validate().is_ok());
    }
}
