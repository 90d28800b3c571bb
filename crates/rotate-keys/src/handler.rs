//! The rotation pass: demote every active key, mint a replacement pair, and
//! write the new credentials back to the owning secret.

use anyhow::{Context, Result};
use tracing::info;

use common::identity::{IdentityStore, KeyStatus};
use common::record::SecretRecord;
use common::secrets::SecretStore;

/// Completion message returned once every configured secret has been rotated.
pub const COMPLETION_MESSAGE: &str =
    "Process key creation & secret update has completed successfully.";

/// Rotate the access keys behind every secret in `secret_ids`, in order.
///
/// For each secret identifier:
/// 1. Fetch the secret and read the owning user from its `UserName` field.
/// 2. Demote every `Active` access key of that user to `Inactive`.
/// 3. Create one replacement key pair.
/// 4. Overwrite the secret with a document describing the replacement pair
///    (full replace; fields the secret previously held are discarded).
///
/// Processing is strictly sequential with no isolation between entries: the
/// first failure aborts the remaining secrets and propagates. Users processed
/// before the failure stay fully rotated; side effects already applied to the
/// failing user (demotions) stay applied.
///
/// # Errors
///
/// Returns an error if a secret cannot be fetched or parsed, or if any
/// identity-service call fails, including the service's own per-user
/// key-count limit refusing the create.
pub async fn run(
    identity: &dyn IdentityStore,
    secrets: &dyn SecretStore,
    secret_ids: &[String],
) -> Result<String> {
    for secret_id in secret_ids {
        let raw = secrets
            .get(secret_id)
            .await
            .with_context(|| format!("failed to fetch secret {secret_id}"))?;
        let record = SecretRecord::from_json(&raw)
            .with_context(|| format!("secret {secret_id} is not a valid key document"))?;
        let user = record.user_name.as_str();
        info!(user = %user, secret = %secret_id, "rotating access keys");

        let keys = identity
            .list_keys(user)
            .await
            .with_context(|| format!("failed to list access keys for user {user}"))?;
        for key in keys.iter().filter(|k| k.status == KeyStatus::Active) {
            identity
                .set_key_status(user, &key.access_key_id, KeyStatus::Inactive)
                .await
                .with_context(|| format!("failed to demote access key {}", key.access_key_id))?;
            info!(user = %user, key_id = %key.access_key_id, "access key demoted to inactive");
        }

        let new_key = identity
            .create_key(user)
            .await
            .with_context(|| format!("failed to create replacement key for user {user}"))?;
        info!(user = %user, key_id = %new_key.access_key_id, "replacement access key created");

        let document = SecretRecord::for_key(&new_key).to_json()?;
        secrets
            .put(secret_id, &document)
            .await
            .with_context(|| format!("failed to update secret {secret_id}"))?;
        info!(user = %user, secret = %secret_id, "secret updated with replacement key");
    }

    Ok(COMPLETION_MESSAGE.to_owned())
}
