use sqlx::FromRow;
use time::OffsetDateTime;

use common::share::PasswordShare;

use super::decode_error;
use crate::database::types::DUuid;

/// A `password_shares` row as stored
#[derive(Debug, Clone, FromRow)]
pub struct PasswordShareRow {
    pub id: DUuid,
    pub created_at: OffsetDateTime,
    pub encrypted_value: String,
    pub remaining_views: i64,
}

impl TryFrom<PasswordShareRow> for PasswordShare {
    type Error = sqlx::Error;

    fn try_from(row: PasswordShareRow) -> Result<Self, Self::Error> {
        Ok(PasswordShare {
            id: row.id.into(),
            created: row.created_at,
            encrypted_value: row.encrypted_value,
            remaining_views: u32::try_from(row.remaining_views).map_err(decode_error)?,
        })
    }
}
