//! `cleanup-keys` binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Initialise AWS SDK clients from the ambient environment.
//! 4. Run one cleanup pass over every configured secret and exit.

use anyhow::Result;
use tracing::info;

use cleanup_keys::config::Config;
use cleanup_keys::{handler, telemetry};
use common::aws::{AwsClients, IamIdentityStore, SecretsManagerStore};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        eprintln!("ERROR: cleanup-keys configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        secrets = cfg.secret_ids().len(),
        "cleanup-keys starting"
    );

    // -----------------------------------------------------------------------
    // 3. AWS clients
    // -----------------------------------------------------------------------
    let aws = AwsClients::init().await;
    let identity = IamIdentityStore::new(aws.iam);
    let secrets = SecretsManagerStore::new(aws.secretsmanager);

    // -----------------------------------------------------------------------
    // 4. Cleanup pass
    // -----------------------------------------------------------------------
    let message = handler::run(&identity, &secrets, &cfg.secret_ids()).await?;
    info!("{message}");

    Ok(())
}
