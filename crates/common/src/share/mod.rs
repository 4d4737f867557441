//! Share records and the closed vocabularies that describe them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Errors raised when a share field is not part of its closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareFieldError {
    #[error("unknown key algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("unknown key purpose: {0}")]
    UnknownPurpose(String),
    #[error("unknown key format: {0}")]
    UnknownFormat(String),
}

/// Key algorithms a key share can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "ed25519")]
    Ed25519,
    #[serde(rename = "ecdsa-p256")]
    EcdsaP256,
    #[serde(rename = "ecdsa-p384")]
    EcdsaP384,
    /// Understood by the validator but not offered when creating a share
    #[serde(rename = "ecdsa-p521")]
    EcdsaP521,
    #[serde(rename = "rsa-2048")]
    Rsa2048,
    #[serde(rename = "rsa-4096")]
    Rsa4096,
    #[serde(rename = "rsa-8192")]
    Rsa8192,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Ed25519,
        Algorithm::EcdsaP256,
        Algorithm::EcdsaP384,
        Algorithm::EcdsaP521,
        Algorithm::Rsa2048,
        Algorithm::Rsa4096,
        Algorithm::Rsa8192,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Ed25519 => "ed25519",
            Algorithm::EcdsaP256 => "ecdsa-p256",
            Algorithm::EcdsaP384 => "ecdsa-p384",
            Algorithm::EcdsaP521 => "ecdsa-p521",
            Algorithm::Rsa2048 => "rsa-2048",
            Algorithm::Rsa4096 => "rsa-4096",
            Algorithm::Rsa8192 => "rsa-8192",
        }
    }

    /// The OpenSSH wire name a key of this algorithm must start with.
    ///
    /// Every RSA size maps to `ssh-rsa`, so a prefix check only tells
    /// key types apart, never RSA key sizes.
    pub fn ssh_prefix(&self) -> &'static str {
        match self {
            Algorithm::Ed25519 => "ssh-ed25519",
            Algorithm::EcdsaP256 => "ecdsa-sha2-nistp256",
            Algorithm::EcdsaP384 => "ecdsa-sha2-nistp384",
            Algorithm::EcdsaP521 => "ecdsa-sha2-nistp521",
            Algorithm::Rsa2048 | Algorithm::Rsa4096 | Algorithm::Rsa8192 => "ssh-rsa",
        }
    }

    /// Whether producers may request this algorithm for a new share
    pub fn offered_at_creation(&self) -> bool {
        !matches!(self, Algorithm::EcdsaP521)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ShareFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| ShareFieldError::UnknownAlgorithm(s.to_string()))
    }
}

/// What the requested key will be used for. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Ssh,
    Git,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Ssh => "ssh",
            Purpose::Git => "git",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = ShareFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ssh" => Ok(Purpose::Ssh),
            "git" => Ok(Purpose::Git),
            other => Err(ShareFieldError::UnknownPurpose(other.to_string())),
        }
    }
}

/// Encoding the consumer must submit their public key in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    /// `algorithm base64 [comment]` single-line form
    #[default]
    Openssh,
    /// `-----BEGIN PUBLIC KEY-----` SPKI block
    Pem,
}

impl KeyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFormat::Openssh => "openssh",
            KeyFormat::Pem => "pem",
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyFormat {
    type Err = ShareFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openssh" => Ok(KeyFormat::Openssh),
            "pem" => Ok(KeyFormat::Pem),
            other => Err(ShareFieldError::UnknownFormat(other.to_string())),
        }
    }
}

/// An encrypted password share as held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordShare {
    pub id: Uuid,
    pub created: OffsetDateTime,
    /// `base64url_nopad(iv || ciphertext || tag)`
    pub encrypted_value: String,
    pub remaining_views: u32,
}

/// A password share about to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPasswordShare {
    pub id: Uuid,
    pub encrypted_value: String,
    pub remaining_views: u32,
}

/// Lifecycle state of a key share, derived from whether a key was stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyShareState {
    Pending,
    Completed,
}

impl fmt::Display for KeyShareState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyShareState::Pending => f.write_str("pending"),
            KeyShareState::Completed => f.write_str("completed"),
        }
    }
}

/// A request for a consumer's public key
///
/// `algorithm`, `purpose` and `format` never change after creation.
/// `public_key` and `completed_at` go from `None` to `Some` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyShare {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    pub algorithm: Algorithm,
    pub purpose: Purpose,
    pub format: KeyFormat,
    pub label: Option<String>,
    pub public_key: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl KeyShare {
    pub fn state(&self) -> KeyShareState {
        match self.public_key {
            Some(_) => KeyShareState::Completed,
            None => KeyShareState::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == KeyShareState::Pending
    }
}

/// A pending key share about to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKeyShare {
    pub id: Uuid,
    pub algorithm: Algorithm,
    pub purpose: Purpose,
    pub format: KeyFormat,
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_round_trips_through_str() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.as_str().parse::<Algorithm>().unwrap(), alg);
        }
        assert_eq!(
            "dsa".parse::<Algorithm>(),
            Err(ShareFieldError::UnknownAlgorithm("dsa".into()))
        );
    }

    #[test]
    fn test_rsa_sizes_share_a_prefix() {
        assert_eq!(Algorithm::Rsa2048.ssh_prefix(), "ssh-rsa");
        assert_eq!(Algorithm::Rsa4096.ssh_prefix(), "ssh-rsa");
        assert_eq!(Algorithm::Rsa8192.ssh_prefix(), "ssh-rsa");
        assert_eq!(Algorithm::Ed25519.ssh_prefix(), "ssh-ed25519");
    }

    #[test]
    fn test_p521_is_not_offered() {
        assert!(!Algorithm::EcdsaP521.offered_at_creation());
        assert!(Algorithm::ALL
            .iter()
            .filter(|a| **a != Algorithm::EcdsaP521)
            .all(|a| a.offered_at_creation()));
    }

    #[test]
    fn test_vocabulary_serde_names() {
        assert_eq!(
            serde_json::to_string(&Algorithm::EcdsaP384).unwrap(),
            "\"ecdsa-p384\""
        );
        assert_eq!(serde_json::to_string(&Purpose::Git).unwrap(), "\"git\"");
        assert_eq!(serde_json::to_string(&KeyFormat::Pem).unwrap(), "\"pem\"");
        assert_eq!(KeyFormat::default(), KeyFormat::Openssh);
        assert!("SSH".parse::<Purpose>().is_err());
        assert!("der".parse::<KeyFormat>().is_err());
    }

    #[test]
    fn test_key_share_state() {
        let mut share = KeyShare {
            id: Uuid::new_v4(),
            created: OffsetDateTime::now_utc(),
            algorithm: Algorithm::Ed25519,
            purpose: Purpose::Ssh,
            format: KeyFormat::Openssh,
            label: None,
            public_key: None,
            completed_at: None,
        };
        assert!(share.is_pending());

        share.public_key = Some("ssh-ed25519 AAAA".into());
        share.completed_at = Some(OffsetDateTime::now_utc());
        assert_eq!(share.state(), KeyShareState::Completed);
    }
}
