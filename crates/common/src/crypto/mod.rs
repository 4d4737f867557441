//! Cryptographic primitives for onetime
//!
//! Password shares are encrypted at rest with AES-256-GCM under a key derived
//! (PBKDF2-HMAC-SHA256) from the share id and an independent random salt.
//! The salt is handed to the producer and never stored, so the database
//! alone is not enough to read a secret.

mod cipher;

pub use cipher::{
    decrypt, derive_key, encrypt, CipherError, SymmetricKey, IV_SIZE, KDF_ITERATIONS, KEY_SIZE,
    TAG_SIZE,
};
