//! [`SecretStore`] backed by AWS Secrets Manager.

use async_trait::async_trait;

use crate::secrets::{SecretStore, SecretStoreError};

/// Production secret store that reads and overwrites Secrets Manager values.
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    /// Wrap a Secrets Manager client.
    pub fn new(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn get(&self, secret_id: &str) -> Result<String, SecretStoreError> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_resource_not_found_exception() {
                    SecretStoreError::NotFound(secret_id.to_owned())
                } else {
                    SecretStoreError::Service(Box::new(service))
                }
            })?;

        resp.secret_string()
            .map(str::to_owned)
            .ok_or_else(|| SecretStoreError::NoStringValue(secret_id.to_owned()))
    }

    async fn put(&self, secret_id: &str, value: &str) -> Result<(), SecretStoreError> {
        self.client
            .update_secret()
            .secret_id(secret_id)
            .secret_string(value)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_resource_not_found_exception() {
                    SecretStoreError::NotFound(secret_id.to_owned())
                } else {
                    SecretStoreError::Service(Box::new(service))
                }
            })?;
        Ok(())
    }
}
