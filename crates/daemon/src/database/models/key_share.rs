use sqlx::FromRow;
use time::OffsetDateTime;

use common::share::KeyShare;

use super::decode_error;
use crate::database::types::DUuid;

/// A `key_shares` row as stored; the vocabulary columns are TEXT
#[derive(Debug, Clone, FromRow)]
pub struct KeyShareRow {
    pub id: DUuid,
    pub created_at: OffsetDateTime,
    pub algorithm: String,
    pub purpose: String,
    pub format: String,
    pub label: Option<String>,
    pub public_key: Option<String>,
    pub completed_at: Option<OffsetDateTime>,
}

impl TryFrom<KeyShareRow> for KeyShare {
    type Error = sqlx::Error;

    fn try_from(row: KeyShareRow) -> Result<Self, Self::Error> {
        Ok(KeyShare {
            id: row.id.into(),
            created: row.created_at,
            algorithm: row.algorithm.parse().map_err(decode_error)?,
            purpose: row.purpose.parse().map_err(decode_error)?,
            format: row.format.parse().map_err(decode_error)?,
            label: row.label,
            public_key: row.public_key,
            completed_at: row.completed_at,
        })
    }
}
