use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{KeyShareStore, PasswordShareStore};
use crate::share::{KeyShare, NewKeyShare, NewPasswordShare, PasswordShare};

/// In-memory share store using HashMaps
///
/// Every operation runs under the write lock, which makes the two
/// conditional operations atomic within one process.
#[derive(Debug, Clone)]
pub struct MemoryShareStore {
    inner: Arc<RwLock<MemoryShareStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryShareStoreInner {
    passwords: HashMap<Uuid, PasswordShare>,
    keys: HashMap<Uuid, KeyShare>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("memory store error: {0}")]
    Internal(String),
    #[error("share already exists: {0}")]
    Duplicate(Uuid),
}

impl MemoryShareStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryShareStoreInner::default())),
        }
    }

    /// Peek at a password share without consuming a view
    pub fn password_share(&self, id: Uuid) -> Result<Option<PasswordShare>, MemoryStoreError> {
        Ok(self.read()?.passwords.get(&id).cloned())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryShareStoreInner>, MemoryStoreError> {
        self.inner
            .read()
            .map_err(|e| MemoryStoreError::Internal(format!("failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryShareStoreInner>, MemoryStoreError> {
        self.inner
            .write()
            .map_err(|e| MemoryStoreError::Internal(format!("failed to acquire write lock: {}", e)))
    }
}

impl Default for MemoryShareStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordShareStore for MemoryShareStore {
    type Error = MemoryStoreError;

    async fn create_password_share(&self, share: NewPasswordShare) -> Result<Uuid, Self::Error> {
        let mut inner = self.write()?;
        if inner.passwords.contains_key(&share.id) {
            return Err(MemoryStoreError::Duplicate(share.id));
        }

        let record = PasswordShare {
            id: share.id,
            created: OffsetDateTime::now_utc(),
            encrypted_value: share.encrypted_value,
            remaining_views: share.remaining_views,
        };
        inner.passwords.insert(record.id, record);

        Ok(share.id)
    }

    async fn decrement_and_get_password_share(
        &self,
        id: Uuid,
    ) -> Result<Option<PasswordShare>, Self::Error> {
        let mut inner = self.write()?;
        match inner.passwords.get_mut(&id) {
            Some(share) if share.remaining_views > 0 => {
                share.remaining_views -= 1;
                Ok(Some(share.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_password_share(&self, id: Uuid) -> Result<bool, Self::Error> {
        let mut inner = self.write()?;
        Ok(inner.passwords.remove(&id).is_some())
    }
}

#[async_trait]
impl KeyShareStore for MemoryShareStore {
    type Error = MemoryStoreError;

    async fn create_key_share(&self, share: NewKeyShare) -> Result<Uuid, Self::Error> {
        let mut inner = self.write()?;
        if inner.keys.contains_key(&share.id) {
            return Err(MemoryStoreError::Duplicate(share.id));
        }

        let record = KeyShare {
            id: share.id,
            created: OffsetDateTime::now_utc(),
            algorithm: share.algorithm,
            purpose: share.purpose,
            format: share.format,
            label: share.label,
            public_key: None,
            completed_at: None,
        };
        inner.keys.insert(record.id, record);

        Ok(share.id)
    }

    async fn get_key_share(&self, id: Uuid) -> Result<Option<KeyShare>, Self::Error> {
        Ok(self.read()?.keys.get(&id).cloned())
    }

    async fn complete_key_share_if_pending(
        &self,
        id: Uuid,
        public_key: &str,
        completed_at: OffsetDateTime,
    ) -> Result<bool, Self::Error> {
        let mut inner = self.write()?;
        match inner.keys.get_mut(&id) {
            Some(share) if share.public_key.is_none() => {
                share.public_key = Some(public_key.to_string());
                share.completed_at = Some(completed_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_key_share(&self, id: Uuid) -> Result<bool, Self::Error> {
        let mut inner = self.write()?;
        Ok(inner.keys.remove(&id).is_some())
    }
}
