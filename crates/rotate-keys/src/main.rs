//! `rotate-keys` binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs on stdout).
//! 3. Initialise AWS SDK clients from the ambient environment.
//! 4. Run one rotation pass over every configured secret and exit.

use anyhow::Result;
use tracing::info;

use common::aws::{AwsClients, IamIdentityStore, SecretsManagerStore};
use rotate_keys::config::Config;
use rotate_keys::{handler, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        secrets = cfg.secret_ids().len(),
        "rotate-keys starting"
    );

    // -----------------------------------------------------------------------
    // 3. AWS clients
    // -----------------------------------------------------------------------
    let aws = AwsClients::init().await;
    let identity = IamIdentityStore::new(aws.iam);
    let secrets = SecretsManagerStore::new(aws.secretsmanager);

    // -----------------------------------------------------------------------
    // 4. Rotation pass
    // -----------------------------------------------------------------------
    let message = handler::run(&identity, &secrets, &cfg.secret_ids()).await?;
    info!("{message}");

    Ok(())
}
