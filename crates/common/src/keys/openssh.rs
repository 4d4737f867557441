use crate::share::Algorithm;

use super::sanitize::sanitize_comment;
use super::{exceeds_max_length, is_base64_body, KeyValidationError};

/// OpenSSH algorithm names a submitted key may start with
pub const KNOWN_SSH_ALGORITHMS: [&str; 4] = [
    "ssh-ed25519",
    "ecdsa-sha2-nistp256",
    "ecdsa-sha2-nistp384",
    "ssh-rsa",
];

/// Validate and normalize an OpenSSH single-line public key
/// (`algorithm base64 [comment]`).
///
/// This is a format and abuse filter: the key blob itself is not decoded.
/// When `expected` is given, the key's wire name must be the one that
/// algorithm maps to. All RSA sizes share `ssh-rsa`, so for RSA this checks
/// the key type only.
///
/// The returned string is `algorithm base64 [sanitized comment]`.
pub fn validate_openssh(
    input: &str,
    expected: Option<Algorithm>,
) -> Result<String, KeyValidationError> {
    if exceeds_max_length(input) {
        return Err(KeyValidationError::TooLong);
    }

    let key = input.trim_matches(|c: char| c.is_ascii_whitespace());
    if !KNOWN_SSH_ALGORITHMS
        .iter()
        .any(|prefix| key.starts_with(prefix))
    {
        return Err(KeyValidationError::UnknownSshAlgorithm);
    }

    if let Some(expected) = expected {
        let prefix = expected.ssh_prefix();
        if !key.starts_with(prefix) {
            return Err(KeyValidationError::AlgorithmMismatch {
                expected: prefix,
            });
        }
    }

    let fields = split_fields(key);
    if fields.len() < 2 {
        return Err(KeyValidationError::MissingKeyData);
    }

    let algorithm = fields[0];
    let data = fields[1];
    if !is_base64_body(data) {
        return Err(KeyValidationError::InvalidBase64);
    }

    let mut normalized = format!("{} {}", algorithm, data);
    if let Some(comment) = fields.get(2) {
        let comment = sanitize_comment(comment);
        if !comment.is_empty() {
            normalized.push(' ');
            normalized.push_str(&comment);
        }
    }

    Ok(normalized)
}

/// Split on runs of ASCII whitespace into at most three fields; the third
/// keeps any inner whitespace.
fn split_fields(key: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(3);
    let mut rest = key;

    while fields.len() < 2 {
        match rest.find(|c: char| c.is_ascii_whitespace()) {
            Some(idx) => {
                fields.push(&rest[..idx]);
                rest = rest[idx..].trim_start_matches(|c: char| c.is_ascii_whitespace());
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        fields.push(rest);
    }

    fields
}
