//! In-memory store fakes for handler tests.
//!
//! Available to this crate's own tests and, behind the `test-util` feature,
//! to the job crates' tests. Production builds never carry them.
//!
//! [`InMemoryIdentityStore`] does not enforce a per-user key limit unless a
//! test opts in via [`InMemoryIdentityStore::with_key_limit`]: the limit
//! belongs to the external identity service, and which side of it a scenario
//! sits on is part of the scenario.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::identity::{IdentityError, IdentityStore, KeyMetadata, KeyStatus, NewAccessKey};
use crate::secrets::{SecretStore, SecretStoreError};

#[derive(Debug, Clone)]
struct FakeKey {
    id: String,
    status: KeyStatus,
}

/// In-memory [`IdentityStore`] with deterministic generated key ids.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: Mutex<HashMap<String, Vec<FakeKey>>>,
    deleted: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    key_limit: Option<usize>,
}

impl InMemoryIdentityStore {
    /// A store whose `create_key` refuses once a user holds `limit` keys,
    /// mirroring the real service's cap.
    pub fn with_key_limit(limit: usize) -> Self {
        Self {
            key_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Register a user with no keys.
    pub fn add_user(&self, user_name: &str) {
        self.users
            .lock()
            .unwrap()
            .entry(user_name.to_owned())
            .or_default();
    }

    /// Register a key with a fixed id and status, creating the user if needed.
    pub fn add_key(&self, user_name: &str, access_key_id: &str, status: KeyStatus) {
        self.users
            .lock()
            .unwrap()
            .entry(user_name.to_owned())
            .or_default()
            .push(FakeKey {
                id: access_key_id.to_owned(),
                status,
            });
    }

    /// Snapshot of the user's `(key id, status)` pairs, in listing order.
    pub fn keys_of(&self, user_name: &str) -> Vec<(String, KeyStatus)> {
        self.users
            .lock()
            .unwrap()
            .get(user_name)
            .map(|keys| keys.iter().map(|k| (k.id.clone(), k.status)).collect())
            .unwrap_or_default()
    }

    /// Every key id deleted so far, in deletion order.
    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn list_keys(&self, user_name: &str) -> Result<Vec<KeyMetadata>, IdentityError> {
        let users = self.users.lock().unwrap();
        let keys = users
            .get(user_name)
            .ok_or_else(|| IdentityError::UserNotFound(user_name.to_owned()))?;
        Ok(keys
            .iter()
            .map(|k| KeyMetadata {
                access_key_id: k.id.clone(),
                user_name: user_name.to_owned(),
                status: k.status,
            })
            .collect())
    }

    async fn create_key(&self, user_name: &str) -> Result<NewAccessKey, IdentityError> {
        let mut users = self.users.lock().unwrap();
        let keys = users
            .get_mut(user_name)
            .ok_or_else(|| IdentityError::UserNotFound(user_name.to_owned()))?;
        if let Some(limit) = self.key_limit {
            if keys.len() >= limit {
                return Err(IdentityError::KeyLimitReached(user_name.to_owned()));
            }
        }

        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let access_key_id = format!("AKIAFAKE{n:04}");
        keys.push(FakeKey {
            id: access_key_id.clone(),
            status: KeyStatus::Active,
        });
        Ok(NewAccessKey {
            access_key_id,
            secret_access_key: format!("fake-secret-{n:04}"),
            user_name: user_name.to_owned(),
        })
    }

    async fn set_key_status(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: KeyStatus,
    ) -> Result<(), IdentityError> {
        let mut users = self.users.lock().unwrap();
        let keys = users
            .get_mut(user_name)
            .ok_or_else(|| IdentityError::UserNotFound(user_name.to_owned()))?;
        let key = keys
            .iter_mut()
            .find(|k| k.id == access_key_id)
            .ok_or_else(|| IdentityError::KeyNotFound(access_key_id.to_owned()))?;
        key.status = status;
        Ok(())
    }

    async fn delete_key(
        &self,
        user_name: &str,
        access_key_id: &str,
    ) -> Result<(), IdentityError> {
        let mut users = self.users.lock().unwrap();
        let keys = users
            .get_mut(user_name)
            .ok_or_else(|| IdentityError::UserNotFound(user_name.to_owned()))?;
        let index = keys
            .iter()
            .position(|k| k.id == access_key_id)
            .ok_or_else(|| IdentityError::KeyNotFound(access_key_id.to_owned()))?;
        keys.remove(index);
        self.deleted.lock().unwrap().push(access_key_id.to_owned());
        Ok(())
    }
}

/// In-memory [`SecretStore`].
///
/// `put` on an unknown identifier fails like the real service's update call:
/// the rotation jobs never create secrets, they only overwrite existing ones.
#[derive(Default)]
pub struct InMemorySecretStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySecretStore {
    /// Provision a secret, as the surrounding infrastructure would.
    pub fn insert(&self, secret_id: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(secret_id.to_owned(), value.to_owned());
    }

    /// Current value of a secret, if it exists.
    pub fn value_of(&self, secret_id: &str) -> Option<String> {
        self.values.lock().unwrap().get(secret_id).cloned()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get(&self, secret_id: &str) -> Result<String, SecretStoreError> {
        self.values
            .lock()
            .unwrap()
            .get(secret_id)
            .cloned()
            .ok_or_else(|| SecretStoreError::NotFound(secret_id.to_owned()))
    }

    async fn put(&self, secret_id: &str, value: &str) -> Result<(), SecretStoreError> {
        let mut values = self.values.lock().unwrap();
        match values.get_mut(secret_id) {
            Some(existing) => {
                *existing = value.to_owned();
                Ok(())
            }
            None => Err(SecretStoreError::NotFound(secret_id.to_owned())),
        }
    }
}
