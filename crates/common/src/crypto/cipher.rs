//! Password-derived AES-256-GCM encryption for password shares
//!
//! A share is encrypted under a key derived from two random identifiers that
//! travel together inside the share link: the share id (the "token") and an
//! independent salt. Only the id is persisted, so the stored envelope alone
//! cannot be opened.
//!
//! The envelope format is `base64url_nopad(iv (12 bytes) || ciphertext || tag (16 bytes))`.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count. Token and salt are random identifiers, not
/// human-chosen passwords.
pub const KDF_ITERATIONS: u32 = 10_000;
/// Size of the derived AES-256 key in bytes
pub const KEY_SIZE: usize = 32;
/// Size of the AES-GCM IV in bytes (96 bits)
pub const IV_SIZE: usize = 12;
/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Errors that can occur during encryption/decryption
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("failed to generate iv: {0}")]
    Random(getrandom::Error),
    #[error("encrypt error")]
    Encrypt,
    #[error("envelope is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("envelope too short: {0} bytes")]
    Truncated(usize),
    #[error("authentication failed")]
    Authentication,
    #[error("decrypted plaintext is not valid utf-8")]
    Utf8,
}

impl CipherError {
    /// Whether this error is an expected outcome of a wrong token/salt or a
    /// tampered envelope, as opposed to a local failure while encrypting.
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, CipherError::Random(_) | CipherError::Encrypt)
    }
}

/// A 256-bit AES-GCM key derived with PBKDF2-HMAC-SHA256.
///
/// The key material is zeroized on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SymmetricKey").field(&"[REDACTED]").finish()
    }
}

impl SymmetricKey {
    /// Derive a key from a token and a salt, both used as their UTF-8 bytes.
    pub fn derive(token: &str, salt: &str) -> Self {
        let mut password = token.as_bytes().to_vec();
        let mut material = [0u8; KEY_SIZE];
        pbkdf2::pbkdf2_hmac::<Sha256>(&password, salt.as_bytes(), KDF_ITERATIONS, &mut material);
        password.zeroize();

        let key = Self(material);
        material.zeroize();
        key
    }

    /// Get a reference to the key bytes
    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.bytes()))
    }

    /// Encrypt raw bytes under this key with a fresh random IV.
    ///
    /// Returns `iv || ciphertext || tag`.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        // never reuse an IV under the same key
        let mut iv = [0u8; IV_SIZE];
        getrandom::getrandom(&mut iv).map_err(CipherError::Random)?;

        let ciphertext = self
            .cipher()
            .encrypt(Nonce::from_slice(&iv), plaintext)
            .map_err(|_| CipherError::Encrypt)?;

        let mut out = Vec::with_capacity(IV_SIZE + ciphertext.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt `iv || ciphertext || tag` and verify its tag.
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        if sealed.len() < IV_SIZE + TAG_SIZE {
            return Err(CipherError::Truncated(sealed.len()));
        }

        let (iv, ciphertext) = sealed.split_at(IV_SIZE);
        self.cipher()
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| CipherError::Authentication)
    }
}

/// Derive the symmetric key for a `(token, salt)` pair.
pub fn derive_key(token: &str, salt: &str) -> SymmetricKey {
    SymmetricKey::derive(token, salt)
}

/// Encrypt a plaintext secret into a base64url (unpadded) envelope.
///
/// Encrypting the same plaintext twice under the same `(token, salt)` yields
/// different envelopes, since every call draws a new IV.
pub fn encrypt(plaintext: &str, token: &str, salt: &str) -> Result<String, CipherError> {
    let key = derive_key(token, salt);
    let sealed = key.seal(plaintext.as_bytes())?;
    Ok(URL_SAFE_NO_PAD.encode(sealed))
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// # Errors
///
/// Returns an error if:
/// - The envelope is not valid unpadded base64url
/// - The envelope is too short to hold an IV and a tag
/// - Authentication fails (wrong token, wrong salt, or tampered data)
/// - The recovered plaintext is not UTF-8
pub fn decrypt(envelope: &str, token: &str, salt: &str) -> Result<String, CipherError> {
    let sealed = URL_SAFE_NO_PAD.decode(envelope.trim())?;
    let key = derive_key(token, salt);
    let plaintext = key.open(&sealed)?;

    match String::from_utf8(plaintext) {
        Ok(value) => Ok(value),
        Err(e) => {
            e.into_bytes().zeroize();
            Err(CipherError::Utf8)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOKEN: &str = "3f1c1c55-7d7e-4b8e-9f55-0d7f2a9a4c11";
    const SALT: &str = "a9e0b7d2-51c4-4a8f-8b0e-6c2d9e4f1a73";

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let secret = "correct horse battery staple";
        let envelope = encrypt(secret, TOKEN, SALT).unwrap();
        assert_eq!(decrypt(&envelope, TOKEN, SALT).unwrap(), secret);
    }

    #[test]
    fn test_encrypt_is_not_deterministic() {
        let first = encrypt("same input", TOKEN, SALT).unwrap();
        let second = encrypt("same input", TOKEN, SALT).unwrap();

        assert_ne!(first, second);
        assert_eq!(decrypt(&first, TOKEN, SALT).unwrap(), "same input");
        assert_eq!(decrypt(&second, TOKEN, SALT).unwrap(), "same input");
    }

    #[test]
    fn test_wrong_salt_fails_authentication() {
        let envelope = encrypt("hunter2", TOKEN, SALT).unwrap();
        let result = decrypt(&envelope, TOKEN, "0b7f5a1e-0000-4000-8000-000000000000");
        assert!(matches!(result, Err(CipherError::Authentication)));
    }

    #[test]
    fn test_wrong_token_fails_authentication() {
        let envelope = encrypt("hunter2", TOKEN, SALT).unwrap();
        let result = decrypt(&envelope, "not-the-share-id", SALT);
        assert!(matches!(result, Err(CipherError::Authentication)));
    }

    #[test]
    fn test_envelope_layout() {
        let secret = "sixteen byte msg";
        let envelope = encrypt(secret, TOKEN, SALT).unwrap();

        // url-safe alphabet, no padding
        assert!(!envelope.contains('='));
        assert!(!envelope.contains('+'));
        assert!(!envelope.contains('/'));

        let raw = URL_SAFE_NO_PAD.decode(&envelope).unwrap();
        assert_eq!(raw.len(), IV_SIZE + secret.len() + TAG_SIZE);
    }

    #[test]
    fn test_tampered_envelope_is_rejected() {
        let envelope = encrypt("do not touch", TOKEN, SALT).unwrap();
        let mut raw = URL_SAFE_NO_PAD.decode(&envelope).unwrap();
        raw[IV_SIZE + 2] ^= 0xFF;
        let tampered = URL_SAFE_NO_PAD.encode(raw);

        let result = decrypt(&tampered, TOKEN, SALT);
        assert!(matches!(result, Err(CipherError::Authentication)));
    }

    #[test]
    fn test_malformed_envelopes_fail_cleanly() {
        assert!(matches!(
            decrypt("!!not base64!!", TOKEN, SALT),
            Err(CipherError::Encoding(_))
        ));
        assert!(matches!(
            decrypt("AAAA", TOKEN, SALT),
            Err(CipherError::Truncated(3))
        ));
        assert!(matches!(
            decrypt("", TOKEN, SALT),
            Err(CipherError::Truncated(0))
        ));
    }

    #[test]
    fn test_empty_and_unicode_plaintext() {
        let envelope = encrypt("", TOKEN, SALT).unwrap();
        assert_eq!(decrypt(&envelope, TOKEN, SALT).unwrap(), "");

        let secret = "pässwörd 🔑 パスワード";
        let envelope = encrypt(secret, TOKEN, SALT).unwrap();
        assert_eq!(decrypt(&envelope, TOKEN, SALT).unwrap(), secret);
    }

    #[test]
    fn test_derive_key_is_deterministic() {
        let a = derive_key(TOKEN, SALT);
        let b = derive_key(TOKEN, SALT);
        let c = derive_key(TOKEN, "other-salt");

        assert_eq!(a.bytes(), b.bytes());
        assert_ne!(a.bytes(), c.bytes());
        assert_eq!(a.bytes().len(), KEY_SIZE);
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = derive_key(TOKEN, SALT);
        let printed = format!("{:?}", key);
        assert!(printed.contains("REDACTED"));
    }

    #[test]
    fn test_authentication_failure_classification() {
        assert!(CipherError::Authentication.is_authentication_failure());
        assert!(CipherError::Truncated(4).is_authentication_failure());
        assert!(!CipherError::Encrypt.is_authentication_failure());
    }
}
