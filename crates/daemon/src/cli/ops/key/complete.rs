use std::path::PathBuf;

use clap::Args;
use uuid::Uuid;

use crate::cli::input::{read_input, InputError};
use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Complete {
    /// Id of the pending key share
    pub id: Uuid,

    /// The public key, inline
    pub key: Option<String>,

    /// Algorithm of the submitted key; must match the one requested
    #[arg(long)]
    pub algorithm: String,

    /// Read the public key from a file (e.g. ~/.ssh/id_ed25519.pub)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Read the public key from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CompleteError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("key was not accepted: the share may not exist, be already completed, or expect a different algorithm or format")]
    Rejected,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Complete {
    type Error = CompleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = read_input(self.key.as_deref(), self.stdin, self.file.as_deref())?;

        let (_, services) = ctx.services().await?;
        let completed = services
            .key_shares()
            .complete_share(self.id, &key, &self.algorithm)
            .await?;

        if !completed {
            return Err(CompleteError::Rejected);
        }
        Ok(format!("Submitted public key for share {}", self.id))
    }
}
