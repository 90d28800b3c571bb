//! Configuration loading and validation for the cleanup-keys job.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated cleanup-keys configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Semicolon-separated list of secret identifiers whose owning users are
    /// swept for inactive access keys. **Required.**
    pub secrets: String,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build cleanup-keys configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise cleanup-keys configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The configured secret identifiers, in listed order. Empty segments
    /// produced by stray semicolons are dropped.
    pub fn secret_ids(&self) -> Vec<String> {
        self.secrets
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
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
    fn splits_on_semicolons() {
        let cfg = config_with("prod/alice;prod/bob;prod/carol");
        assert_eq!(cfg.secret_ids(), vec!["prod/alice", "prod/bob", "prod/carol"]);
    }

    #[test]
    fn trims_whitespace_and_drops_empty_segments() {
        let cfg = config_with(" prod/alice ;; prod/bob ;");
        assert_eq!(cfg.secret_ids(), vec!["prod/alice", "prod/bob"]);
    }

    #[test]
    fn absent_secret_list_fails_deserialisation() {
        let empty = config::Config::builder().build().unwrap();
        assert!(empty.try_deserialize::<Config>().is_err());
    }

    #[test]
    fn validate_rejects_effectively_empty_list() {
        assert!(config_with(" ; ; ").validate().is_err());
    }

    #[test]
    fn validate_accepts_populated_list() {
        assert!(config_with("prod/alice").validate().is_ok());
    }
}
