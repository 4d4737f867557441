use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use common::share::{KeyShare, NewKeyShare, NewPasswordShare, PasswordShare};
use common::store::{KeyShareStore, PasswordShareStore};

use super::models::{KeyShareRow, PasswordShareRow};
use super::types::DUuid;
use super::Database;

#[async_trait]
impl PasswordShareStore for Database {
    type Error = sqlx::Error;

    async fn create_password_share(&self, share: NewPasswordShare) -> Result<Uuid, Self::Error> {
        let id = DUuid::from(share.id);
        let created_at = OffsetDateTime::now_utc();
        let remaining_views = i64::from(share.remaining_views);

        sqlx::query(
            r#"
            INSERT INTO password_shares (id, created_at, encrypted_value, remaining_views)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(id)
        .bind(created_at)
        .bind(&share.encrypted_value)
        .bind(remaining_views)
        .execute(&**self)
        .await?;

        Ok(share.id)
    }

    async fn decrement_and_get_password_share(
        &self,
        id: Uuid,
    ) -> Result<Option<PasswordShare>, Self::Error> {
        let id = DUuid::from(id);

        // one statement: the guard and the decrement cannot interleave
        let row = sqlx::query_as::<_, PasswordShareRow>(
            r#"
            UPDATE password_shares
            SET remaining_views = remaining_views - 1
            WHERE id = ?1 AND remaining_views > 0
            RETURNING id, created_at, encrypted_value, remaining_views
            "#,
        )
        .bind(id)
        .fetch_optional(&**self)
        .await?;

        row.map(PasswordShare::try_from).transpose()
    }

    async fn delete_password_share(&self, id: Uuid) -> Result<bool, Self::Error> {
        let id = DUuid::from(id);
        let result = sqlx::query("DELETE FROM password_shares WHERE id = ?1")
            .bind(id)
            .execute(&**self)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl KeyShareStore for Database {
    type Error = sqlx::Error;

    async fn create_key_share(&self, share: NewKeyShare) -> Result<Uuid, Self::Error> {
        let id = DUuid::from(share.id);
        let created_at = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO key_shares (id, created_at, algorithm, purpose, format, label)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(id)
        .bind(created_at)
        .bind(share.algorithm.as_str())
        .bind(share.purpose.as_str())
        .bind(share.format.as_str())
        .bind(&share.label)
        .execute(&**self)
        .await?;

        Ok(share.id)
    }

    async fn get_key_share(&self, id: Uuid) -> Result<Option<KeyShare>, Self::Error> {
        let id = DUuid::from(id);
        let row = sqlx::query_as::<_, KeyShareRow>(
            r#"
            SELECT
                id, created_at, algorithm, purpose, format,
                label, public_key, completed_at
            FROM key_shares
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&**self)
        .await?;

        row.map(KeyShare::try_from).transpose()
    }

    async fn complete_key_share_if_pending(
        &self,
        id: Uuid,
        public_key: &str,
        completed_at: OffsetDateTime,
    ) -> Result<bool, Self::Error> {
        let id = DUuid::from(id);
        let result = sqlx::query(
            r#"
            UPDATE key_shares
            SET public_key = ?1, completed_at = ?2
            WHERE id = ?3 AND public_key IS NULL
            "#,
        )
        .bind(public_key)
        .bind(completed_at)
        .bind(id)
        .execute(&**self)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_key_share(&self, id: Uuid) -> Result<bool, Self::Error> {
        let id = DUuid::from(id);
        let result = sqlx::query("DELETE FROM key_shares WHERE id = ?1")
            .bind(id)
            .execute(&**self)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl Database {
    /// Delete password shares left at zero views.
    ///
    /// The service deletes a share right after its last view, so a zero
    /// row only survives if that delete never ran.
    pub async fn purge_exhausted_password_shares(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM password_shares WHERE remaining_views <= 0")
            .execute(&**self)
            .await?;

        Ok(result.rows_affected())
    }
}
