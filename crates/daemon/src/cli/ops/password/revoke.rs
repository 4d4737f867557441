use clap::Args;
use uuid::Uuid;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Revoke {
    /// Id of the share to delete
    pub id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum RevokeError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Revoke {
    type Error = RevokeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, services) = ctx.services().await?;
        let removed = services.password_shares().revoke_share(self.id).await?;

        Ok(if removed {
            format!("Revoked password share {}", self.id)
        } else {
            format!("No password share {} (already viewed or revoked)", self.id)
        })
    }
}
