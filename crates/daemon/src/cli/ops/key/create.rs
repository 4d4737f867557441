use clap::Args;

use common::service::KeyShareError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Create {
    /// Key algorithm to request: ed25519, ecdsa-p256, ecdsa-p384, rsa-2048, rsa-4096 or rsa-8192
    #[arg(long)]
    pub algorithm: String,

    /// What the key is for: ssh or git
    #[arg(long, default_value = "ssh")]
    pub purpose: String,

    /// Encoding the key must be submitted in: openssh or pem (default: openssh)
    #[arg(long)]
    pub format: Option<String>,

    /// Free-text description shown to whoever completes the share
    #[arg(long)]
    pub label: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("failed to create key share: {0}")]
    Share(#[from] KeyShareError<sqlx::Error>),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = CreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (state, services) = ctx.services().await?;
        let id = services
            .key_shares()
            .create_pending_share(
                &self.algorithm,
                &self.purpose,
                self.label.as_deref(),
                self.format.as_deref(),
            )
            .await?;

        Ok(format!(
            "id:   {}\nlink: {}",
            id,
            state.config.key_link(&id)
        ))
    }
}
