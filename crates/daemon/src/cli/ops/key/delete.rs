use clap::Args;
use uuid::Uuid;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Delete {
    /// Id of the key share to delete
    pub id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = DeleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, services) = ctx.services().await?;
        let removed = services.key_shares().delete_share(self.id).await?;

        Ok(if removed {
            format!("Deleted key share {}", self.id)
        } else {
            format!("No key share {}", self.id)
        })
    }
}
