//! [`IdentityStore`] backed by AWS IAM.

use async_trait::async_trait;
use aws_sdk_iam::types::{AccessKeyMetadata, StatusType};
use tracing::warn;

use crate::identity::{IdentityError, IdentityStore, KeyMetadata, KeyStatus, NewAccessKey};

/// Production identity store that drives the AWS IAM access-key operations.
pub struct IamIdentityStore {
    client: aws_sdk_iam::Client,
}

impl IamIdentityStore {
    /// Wrap an IAM client.
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityStore for IamIdentityStore {
    async fn list_keys(&self, user_name: &str) -> Result<Vec<KeyMetadata>, IdentityError> {
        // IAM caps users at two access keys, so one unpaginated page is
        // always enough.
        let resp = self
            .client
            .list_access_keys()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_entity_exception() {
                    IdentityError::UserNotFound(user_name.to_owned())
                } else {
                    IdentityError::Service(Box::new(service))
                }
            })?;

        let mut keys = Vec::new();
        for meta in resp.access_key_metadata() {
            match key_from_metadata(meta, user_name) {
                Some(key) => keys.push(key),
                None => {
                    warn!(
                        user = %user_name,
                        "skipping access key listing entry with missing or unrecognised fields"
                    );
                }
            }
        }
        Ok(keys)
    }

    async fn create_key(&self, user_name: &str) -> Result<NewAccessKey, IdentityError> {
        let resp = self
            .client
            .create_access_key()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_limit_exceeded_exception() {
                    IdentityError::KeyLimitReached(user_name.to_owned())
                } else if service.is_no_such_entity_exception() {
                    IdentityError::UserNotFound(user_name.to_owned())
                } else {
                    IdentityError::Service(Box::new(service))
                }
            })?;

        let key = resp.access_key().ok_or_else(|| {
            IdentityError::Service("create access key response contained no key".into())
        })?;

        Ok(NewAccessKey {
            access_key_id: key.access_key_id().to_owned(),
            secret_access_key: key.secret_access_key().to_owned(),
            user_name: key.user_name().to_owned(),
        })
    }

    async fn set_key_status(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: KeyStatus,
    ) -> Result<(), IdentityError> {
        self.client
            .update_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .status(status_type(status))
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_entity_exception() {
                    IdentityError::KeyNotFound(access_key_id.to_owned())
                } else {
                    IdentityError::Service(Box::new(service))
                }
            })?;
        Ok(())
    }

    async fn delete_key(
        &self,
        user_name: &str,
        access_key_id: &str,
    ) -> Result<(), IdentityError> {
        self.client
            .delete_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_entity_exception() {
                    IdentityError::KeyNotFound(access_key_id.to_owned())
                } else {
                    IdentityError::Service(Box::new(service))
                }
            })?;
        Ok(())
    }
}

/// Convert one IAM listing entry into a [`KeyMetadata`].
///
/// Returns `None` for entries missing an id or status, or carrying a status
/// variant other than Active/Inactive; the caller skips those with a warning.
fn key_from_metadata(meta: &AccessKeyMetadata, fallback_user: &str) -> Option<KeyMetadata> {
    let access_key_id = meta.access_key_id()?;
    let status = match meta.status()? {
        StatusType::Active => KeyStatus::Active,
        StatusType::Inactive => KeyStatus::Inactive,
        _ => return None,
    };
    Some(KeyMetadata {
        access_key_id: access_key_id.to_owned(),
        user_name: meta.user_name().unwrap_or(fallback_user).to_owned(),
        status,
    })
}

/// The wire status value for a [`KeyStatus`].
fn status_type(status: KeyStatus) -> StatusType {
    match status {
        KeyStatus::Active => StatusType::Active,
        KeyStatus::Inactive => StatusType::Inactive,
    }
}
