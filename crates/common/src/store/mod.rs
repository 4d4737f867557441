//! Storage capabilities the share services are built on
//!
//! The store is the single source of truth and the only point of mutual
//! exclusion. Services hold no state between calls; every operation is one
//! round trip keyed by share id.

use std::fmt::Debug;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::share::{KeyShare, NewKeyShare, NewPasswordShare, PasswordShare};

mod memory;

pub use memory::{MemoryShareStore, MemoryStoreError};

#[async_trait]
pub trait PasswordShareStore: Send + Sync + Debug + Clone + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a new password share and return its id
    async fn create_password_share(&self, share: NewPasswordShare) -> Result<Uuid, Self::Error>;

    /// Atomically consume one view of a share.
    ///
    /// Decrements `remaining_views` by one and returns the record as it is
    /// *after* the decrement, but only if the count was above zero
    /// beforehand. Otherwise nothing changes and `None` is returned.
    ///
    /// Implementations must make this a single indivisible operation: under
    /// any number of concurrent callers, at most one call may succeed per
    /// available view.
    async fn decrement_and_get_password_share(
        &self,
        id: Uuid,
    ) -> Result<Option<PasswordShare>, Self::Error>;

    /// Delete a password share, returning whether a record was removed
    async fn delete_password_share(&self, id: Uuid) -> Result<bool, Self::Error>;
}

#[async_trait]
pub trait KeyShareStore: Send + Sync + Debug + Clone + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a new pending key share and return its id
    async fn create_key_share(&self, share: NewKeyShare) -> Result<Uuid, Self::Error>;

    async fn get_key_share(&self, id: Uuid) -> Result<Option<KeyShare>, Self::Error>;

    /// Store a public key on a share that does not have one yet.
    ///
    /// Sets `public_key` and `completed_at` only if `public_key` is still
    /// unset, as a single conditional write. Returns `false` when the share
    /// does not exist or was already completed; the stored key is never
    /// overwritten.
    async fn complete_key_share_if_pending(
        &self,
        id: Uuid,
        public_key: &str,
        completed_at: OffsetDateTime,
    ) -> Result<bool, Self::Error>;

    /// Delete a key share, returning whether a record was removed
    async fn delete_key_share(&self, id: Uuid) -> Result<bool, Self::Error>;
}
