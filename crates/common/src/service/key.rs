use time::OffsetDateTime;
use uuid::Uuid;

use crate::keys::{sanitize_label, validate_public_key};
use crate::share::{Algorithm, KeyFormat, KeyShare, NewKeyShare, Purpose, ShareFieldError};
use crate::store::KeyShareStore;

#[derive(Debug, thiserror::Error)]
pub enum KeyShareError<T> {
    #[error("share store error: {0}")]
    Store(T),
    #[error(transparent)]
    InvalidField(#[from] ShareFieldError),
    #[error("key algorithm is not offered for new shares: {0}")]
    AlgorithmNotOffered(Algorithm),
}

/// Collects a consumer's public key for a producer.
///
/// A share starts `Pending` and becomes `Completed` through exactly one
/// accepted submission. The completion itself is the store's conditional
/// write, so concurrent submissions cannot overwrite each other.
#[derive(Debug, Clone)]
pub struct KeyShareService<S> {
    store: S,
}

impl<S: KeyShareStore> KeyShareService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a pending share requesting a key of the given kind.
    ///
    /// `format` defaults to `openssh`. The label is sanitized and dropped
    /// if nothing printable is left.
    pub async fn create_pending_share(
        &self,
        algorithm: &str,
        purpose: &str,
        label: Option<&str>,
        format: Option<&str>,
    ) -> Result<Uuid, KeyShareError<S::Error>> {
        let algorithm: Algorithm = algorithm.parse()?;
        if !algorithm.offered_at_creation() {
            tracing::debug!(%algorithm, "rejected key share: algorithm not offered");
            return Err(KeyShareError::AlgorithmNotOffered(algorithm));
        }
        let purpose: Purpose = purpose.parse()?;
        let format = match format {
            Some(format) => format.parse::<KeyFormat>()?,
            None => KeyFormat::default(),
        };

        let id = self
            .store
            .create_key_share(NewKeyShare {
                id: Uuid::new_v4(),
                algorithm,
                purpose,
                format,
                label: sanitize_label(label),
            })
            .await
            .map_err(KeyShareError::Store)?;

        tracing::info!(%id, %algorithm, %purpose, %format, "created key share");
        Ok(id)
    }

    /// Submit a public key for a pending share.
    ///
    /// Returns `false` if the share does not exist or is already completed,
    /// if `algorithm` is not the share's algorithm, if the key does not pass
    /// validation for the share's format, or if another submission won the
    /// race. The stored key is the normalized form.
    pub async fn complete_share(
        &self,
        id: Uuid,
        public_key: &str,
        algorithm: &str,
    ) -> Result<bool, S::Error> {
        let Some(share) = self.store.get_key_share(id).await? else {
            tracing::debug!(%id, "key share not found");
            return Ok(false);
        };

        if !share.is_pending() {
            tracing::debug!(%id, "key share already completed");
            return Ok(false);
        }

        if share.algorithm.as_str() != algorithm {
            tracing::debug!(%id, expected = %share.algorithm, "key share algorithm mismatch");
            return Ok(false);
        }

        let normalized = match validate_public_key(share.format, public_key, Some(share.algorithm))
        {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::debug!(%id, format = %share.format, error = %e, "rejected public key");
                return Ok(false);
            }
        };

        let completed = self
            .store
            .complete_key_share_if_pending(id, &normalized, OffsetDateTime::now_utc())
            .await?;

        if completed {
            tracing::info!(%id, "completed key share");
        } else {
            tracing::warn!(%id, "key share was completed by a concurrent submission");
        }
        Ok(completed)
    }

    pub async fn get_share(&self, id: Uuid) -> Result<Option<KeyShare>, S::Error> {
        self.store.get_key_share(id).await
    }

    /// Returns whether a share was removed
    pub async fn delete_share(&self, id: Uuid) -> Result<bool, S::Error> {
        let removed = self.store.delete_key_share(id).await?;
        if removed {
            tracing::info!(%id, "deleted key share");
        }
        Ok(removed)
    }
}
