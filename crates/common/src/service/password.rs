use std::fmt;

use uuid::Uuid;

use crate::crypto::{decrypt, encrypt, CipherError};
use crate::share::NewPasswordShare;
use crate::store::PasswordShareStore;

/// Longest secret accepted for a password share, in characters
pub const MAX_SECRET_LENGTH: usize = 5000;
pub const DEFAULT_VIEWS: u32 = 1;
pub const DEFAULT_MAX_VIEWS: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum PasswordShareError<T> {
    #[error("share store error: {0}")]
    Store(T),
    #[error("secret exceeds {} characters", MAX_SECRET_LENGTH)]
    TooLong,
    #[error("view budget must be between 1 and {max}, got {requested}")]
    InvalidViewBudget { requested: u32, max: u32 },
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
}

/// Bounds applied to the view budget of new password shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimits {
    /// Budget used when the producer does not ask for one
    pub default_views: u32,
    /// Largest budget a producer may ask for
    pub max_views: u32,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            default_views: DEFAULT_VIEWS,
            max_views: DEFAULT_MAX_VIEWS,
        }
    }
}

/// The two halves of a password share link.
///
/// Both are needed to decrypt. Only the id is persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct CreatedPasswordShare {
    pub id: Uuid,
    pub salt: String,
}

impl fmt::Debug for CreatedPasswordShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedPasswordShare")
            .field("id", &self.id)
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

/// One-time (or n-time) disclosure of an encrypted secret.
///
/// A share is `Active(n)` while its store record has `n > 0` remaining
/// views and gone once the record is deleted. Every read attempt consumes
/// a view before decryption is tried, so a wrong salt is not free to
/// retry.
#[derive(Debug, Clone)]
pub struct PasswordShareService<S> {
    store: S,
    limits: ViewLimits,
}

impl<S: PasswordShareStore> PasswordShareService<S> {
    pub fn new(store: S) -> Self {
        Self::with_limits(store, ViewLimits::default())
    }

    pub fn with_limits(store: S, limits: ViewLimits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encrypt and persist a secret.
    ///
    /// The share id doubles as the encryption token and a second random
    /// identifier is drawn as the salt. `views` falls back to the configured
    /// default budget.
    pub async fn create_share(
        &self,
        plaintext: &str,
        views: Option<u32>,
    ) -> Result<CreatedPasswordShare, PasswordShareError<S::Error>> {
        if plaintext.chars().count() > MAX_SECRET_LENGTH {
            tracing::debug!("rejected password share: secret too long");
            return Err(PasswordShareError::TooLong);
        }

        let views = views.unwrap_or(self.limits.default_views);
        if views == 0 || views > self.limits.max_views {
            tracing::debug!(views, "rejected password share: view budget out of range");
            return Err(PasswordShareError::InvalidViewBudget {
                requested: views,
                max: self.limits.max_views,
            });
        }

        let id = Uuid::new_v4();
        let salt = Uuid::new_v4().to_string();
        let encrypted_value = encrypt(plaintext, &id.to_string(), &salt)?;

        let id = self
            .store
            .create_password_share(NewPasswordShare {
                id,
                encrypted_value,
                remaining_views: views,
            })
            .await
            .map_err(PasswordShareError::Store)?;

        tracing::info!(%id, views, "created password share");
        Ok(CreatedPasswordShare { id, salt })
    }

    /// Consume one view and try to decrypt the share with `salt`.
    ///
    /// Returns `None` when the share is unknown, already exhausted, or the
    /// salt is wrong; the three cases are indistinguishable to the caller.
    /// The record is deleted once its last view is consumed, whether or not
    /// decryption succeeded.
    pub async fn get_share(&self, id: Uuid, salt: &str) -> Result<Option<String>, S::Error> {
        let Some(share) = self.store.decrement_and_get_password_share(id).await? else {
            tracing::debug!(%id, "password share not available");
            return Ok(None);
        };

        let plaintext = match decrypt(&share.encrypted_value, &id.to_string(), salt) {
            Ok(plaintext) => Some(plaintext),
            Err(e) if e.is_authentication_failure() => {
                tracing::warn!(%id, "password share opened with a wrong salt");
                None
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "failed to decrypt password share");
                None
            }
        };

        if share.remaining_views == 0 {
            self.store.delete_password_share(id).await?;
            tracing::info!(%id, "password share exhausted");
        }

        Ok(plaintext)
    }

    /// Delete a share before its views run out.
    ///
    /// Returns whether a share was removed.
    pub async fn revoke_share(&self, id: Uuid) -> Result<bool, S::Error> {
        let removed = self.store.delete_password_share(id).await?;
        if removed {
            tracing::info!(%id, "revoked password share");
        }
        Ok(removed)
    }
}
