/**
 * Password-derived authenticated encryption
 *  for password shares.
 */
pub mod crypto;
/**
 * Shape and abuse screening for submitted
 *  public keys, plus the shared text sanitizer.
 */
pub mod keys;
/**
 * Share records and their closed vocabularies
 *  (algorithm, purpose, format).
 */
pub mod share;
/**
 * Storage capabilities the services depend on,
 *  and an in-memory implementation.
 */
pub mod store;
/**
 * Password and key share lifecycles.
 */
pub mod service;

pub mod prelude {
    pub use crate::crypto::{decrypt, encrypt, CipherError};
    pub use crate::keys::{validate_public_key, KeyValidationError};
    pub use crate::service::{
        CreatedPasswordShare, KeyShareError, KeyShareService, PasswordShareError,
        PasswordShareService, ViewLimits,
    };
    pub use crate::share::{
        Algorithm, KeyFormat, KeyShare, KeyShareState, NewKeyShare, NewPasswordShare,
        PasswordShare, Purpose, ShareFieldError,
    };
    pub use crate::store::{KeyShareStore, MemoryShareStore, PasswordShareStore};
}
