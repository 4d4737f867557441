//! The share lifecycle services
//!
//! Each service is generic over the storage capability it needs and is
//! constructed explicitly with a store handle. Expected failures (unknown
//! ids, wrong salts, rejected keys, lost races) come back as `None` or
//! `false`; only store failures are errors.

mod key;
mod password;

pub use key::{KeyShareError, KeyShareService};
pub use password::{
    CreatedPasswordShare, PasswordShareError, PasswordShareService, ViewLimits, DEFAULT_MAX_VIEWS,
    DEFAULT_VIEWS, MAX_SECRET_LENGTH,
};
