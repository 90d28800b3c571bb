//! The cleanup pass: delete every inactive access key of every user owning a
//! configured secret.

use anyhow::{Context, Result};
use tracing::info;

use common::identity::{IdentityStore, KeyStatus};
use common::record::SecretRecord;
use common::secrets::SecretStore;

/// Completion message returned once every configured secret has been swept.
pub const COMPLETION_MESSAGE: &str =
    "Process of inactive key deletion completed successfully.";

/// Delete the inactive access keys behind every secret in `secret_ids`.
///
/// For each secret identifier the owning user is read from the secret's
/// `UserName` field, the user's keys are listed, and each `Inactive` key is
/// deleted. Active keys and the secret itself are never touched; a user with
/// no inactive keys is a no-op.
///
/// Processing is strictly sequential with no isolation between entries: the
/// first failure aborts the remaining secrets and propagates. Keys deleted
/// before the failure stay deleted.
///
/// # Errors
///
/// Returns an error if a secret cannot be fetched or parsed, or if any
/// identity-service call fails.
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
        info!(user = %user, secret = %secret_id, "sweeping inactive access keys");

        let keys = identity
            .list_keys(user)
            .await
            .with_context(|| format!("failed to list access keys for user {user}"))?;
        for key in keys.iter().filter(|k| k.status == KeyStatus::Inactive) {
            identity
                .delete_key(user, &key.access_key_id)
                .await
                .with_context(|| format!("failed to delete access key {}", key.access_key_id))?;
            info!(user = %user, key_id = %key.access_key_id, "inactive access key deleted");
        }
    }

    Ok(COMPLETION_MESSAGE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    use common::identity::{IdentityError, KeyMetadata, MockIdentityStore};
    use common::testing::{InMemoryIdentityStore, InMemorySecretStore};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[tokio::test]
    async fn deletes_only_inactive_keys() {
        let identity = InMemoryIdentityStore::default();
        identity.add_key("alice", "K1", KeyStatus::Inactive);
        identity.add_key("alice", "K2", KeyStatus::Active);
        identity.add_key("alice", "K3", KeyStatus::Inactive);
        let secrets = InMemorySecretStore::default();
        secrets.insert("prod/alice", r#"{"UserName": "alice"}"#);

        let message = run(&identity, &secrets, &ids(&["prod/alice"])).await.unwrap();
        assert_eq!(message, COMPLETION_MESSAGE);

        assert_eq!(
            identity.keys_of("alice"),
            vec![("K2".to_owned(), KeyStatus::Active)]
        );
        assert_eq!(identity.deleted_ids(), vec!["K1", "K3"]);

        // Cleanup reads the secret but never writes it.
        assert_eq!(
            secrets.value_of("prod/alice").unwrap(),
            r#"{"UserName": "alice"}"#
        );
    }

    #[tokio::test]
    async fn user_with_no_inactive_keys_is_a_noop() {
        let identity = InMemoryIdentityStore::default();
        identity.add_key("bob", "B1", KeyStatus::Active);
        let secrets = InMemorySecretStore::default();
        secrets.insert("prod/bob", r#"{"UserName": "bob"}"#);

        run(&identity, &secrets, &ids(&["prod/bob"])).await.unwrap();

        assert_eq!(
            identity.keys_of("bob"),
            vec![("B1".to_owned(), KeyStatus::Active)]
        );
        assert!(identity.deleted_ids().is_empty());
    }

    #[tokio::test]
    async fn running_cleanup_twice_changes_nothing_the_second_time() {
        let identity = InMemoryIdentityStore::default();
        identity.add_key("alice", "K1", KeyStatus::Inactive);
        identity.add_key("alice", "K2", KeyStatus::Active);
        let secrets = InMemorySecretStore::default();
        secrets.insert("prod/alice", r#"{"UserName": "alice"}"#);
        let secret_ids = ids(&["prod/alice"]);

        run(&identity, &secrets, &secret_ids).await.unwrap();
        let after_first = identity.keys_of("alice");
        run(&identity, &secrets, &secret_ids).await.unwrap();

        assert_eq!(identity.keys_of("alice"), after_first);
        assert_eq!(identity.deleted_ids(), vec!["K1"]);
    }

    #[tokio::test]
    async fn sweeps_secrets_in_listed_order() {
        let identity = InMemoryIdentityStore::default();
        identity.add_key("amy", "A1", KeyStatus::Inactive);
        identity.add_key("bob", "B1", KeyStatus::Inactive);
        let secrets = InMemorySecretStore::default();
        secrets.insert("prod/amy", r#"{"UserName": "amy"}"#);
        secrets.insert("prod/bob", r#"{"UserName": "bob"}"#);

        run(&identity, &secrets, &ids(&["prod/amy", "prod/bob"]))
            .await
            .unwrap();

        assert_eq!(identity.deleted_ids(), vec!["A1", "B1"]);
    }

    #[tokio::test]
    async fn missing_secret_aborts_before_any_identity_call() {
        // No expectations: any identity call would panic the test.
        let identity = MockIdentityStore::new();
        let secrets = InMemorySecretStore::default();

        let err = run(&identity, &secrets, &ids(&["prod/missing"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("prod/missing"));
    }

    #[tokio::test]
    async fn malformed_secret_document_aborts_the_run() {
        let identity = MockIdentityStore::new();
        let secrets = InMemorySecretStore::default();
        secrets.insert("prod/alice", "{\"Role\": \"admin\"}");

        let err = run(&identity, &secrets, &ids(&["prod/alice"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("prod/alice"));
    }

    #[tokio::test]
    async fn delete_failure_aborts_remaining_secrets() {
        let mut identity = MockIdentityStore::new();
        // Exactly one list call: the failure must stop the run before the
        // second secret's user is ever listed.
        identity
            .expect_list_keys()
            .withf(|user| user == "alice")
            .times(1)
            .returning(|_| {
                Ok(vec![KeyMetadata {
                    access_key_id: "K1".into(),
                    user_name: "alice".into(),
                    status: KeyStatus::Inactive,
                }])
            });
        identity
            .expect_delete_key()
            .withf(|user, key_id| user == "alice" && key_id == "K1")
            .times(1)
            .returning(|_, _| Err(IdentityError::Service("throttled".into())));

        let secrets = InMemorySecretStore::default();
        secrets.insert("prod/alice", r#"{"UserName": "alice"}"#);
        secrets.insert("prod/bob", r#"{"UserName": "bob"}"#);

        let err = run(&identity, &secrets, &ids(&["prod/alice", "prod/bob"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("K1"));
    }
}
