use std::path::PathBuf;

use clap::Args;

use common::service::PasswordShareError;

use crate::cli::input::{read_input, InputError};
use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Create {
    /// The secret to share (prefer --stdin or --file to keep it out of shell history)
    pub secret: Option<String>,

    /// Read the secret from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Read the secret from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Number of times the secret may be viewed (default from config)
    #[arg(long)]
    pub views: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("secret is empty")]
    Empty,
    #[error("failed to create password share: {0}")]
    Share(#[from] PasswordShareError<sqlx::Error>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = CreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let secret = read_input(self.secret.as_deref(), self.stdin, self.file.as_deref())?;
        if secret.is_empty() {
            return Err(CreateError::Empty);
        }

        let (state, services) = ctx.services().await?;
        let created = services
            .password_shares()
            .create_share(&secret, self.views)
            .await?;

        Ok(format!(
            "id:   {}\nsalt: {}\nlink: {}",
            created.id,
            created.salt,
            state.config.password_link(&created.id, &created.salt)
        ))
    }
}
