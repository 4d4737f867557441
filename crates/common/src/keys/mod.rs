//! Public key validation for key shares
//!
//! Submitted keys are screened for shape and abuse, never parsed
//! cryptographically: a key that passes may still be unusable. Two
//! encodings are accepted, see [`KeyFormat`].

use std::sync::LazyLock;

use regex::Regex;

use crate::share::{Algorithm, KeyFormat};

mod openssh;
mod pem;
mod sanitize;

pub use openssh::{validate_openssh, KNOWN_SSH_ALGORITHMS};
pub use pem::{validate_pem, MIN_PEM_BODY_LENGTH, PEM_FOOTER, PEM_HEADER, PEM_LINE_WIDTH};
pub use sanitize::{sanitize_comment, sanitize_label, MAX_COMMENT_LENGTH};

/// Maximum length of a submitted key, in characters, before trimming
pub const MAX_KEY_LENGTH: usize = 5000;

static BASE64_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]+=*$").expect("base64 pattern must compile"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyValidationError {
    #[error("public key exceeds {} characters", MAX_KEY_LENGTH)]
    TooLong,
    #[error("unsupported ssh key algorithm")]
    UnknownSshAlgorithm,
    #[error("key algorithm does not match the requested one, expected {expected}")]
    AlgorithmMismatch { expected: &'static str },
    #[error("ssh key is missing its key data")]
    MissingKeyData,
    #[error("key data is not valid base64")]
    InvalidBase64,
    #[error("missing `{}` header", PEM_HEADER)]
    MissingPemHeader,
    #[error("missing `{}` footer", PEM_FOOTER)]
    MissingPemFooter,
    #[error("pem block has no body")]
    MissingPemBody,
    #[error("pem body too short: {0} characters")]
    PemBodyTooShort(usize),
}

/// Validate and normalize a submitted public key in the given format.
///
/// `expected` is only checked for OpenSSH keys; a PEM body carries no
/// algorithm name to compare against.
pub fn validate_public_key(
    format: KeyFormat,
    key: &str,
    expected: Option<Algorithm>,
) -> Result<String, KeyValidationError> {
    match format {
        KeyFormat::Openssh => validate_openssh(key, expected),
        KeyFormat::Pem => validate_pem(key),
    }
}

fn exceeds_max_length(input: &str) -> bool {
    input.chars().count() > MAX_KEY_LENGTH
}

fn is_base64_body(data: &str) -> bool {
    BASE64_BODY.is_match(data)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dispatch_by_format() {
        let ssh = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl";
        assert!(validate_public_key(KeyFormat::Openssh, ssh, Some(Algorithm::Ed25519)).is_ok());
        assert_eq!(
            validate_public_key(KeyFormat::Pem, ssh, None),
            Err(KeyValidationError::MissingPemHeader)
        );

        let pem = format!(
            "{}\nMCowBQYDK2VwAyEAGb9ECWmEzf6FQbrBZ9w7lshQhqowtrbLDFw4rXAxZuE=\n{}",
            PEM_HEADER, PEM_FOOTER
        );
        // expected algorithm is ignored for pem
        assert!(validate_public_key(KeyFormat::Pem, &pem, Some(Algorithm::Rsa2048)).is_ok());
        assert_eq!(
            validate_public_key(KeyFormat::Openssh, &pem, None),
            Err(KeyValidationError::UnknownSshAlgorithm)
        );
    }

    #[test]
    fn test_length_limit_counts_characters() {
        assert!(!exceeds_max_length(&"é".repeat(MAX_KEY_LENGTH)));
        assert!(exceeds_max_length(&"a".repeat(MAX_KEY_LENGTH + 1)));
    }
}
