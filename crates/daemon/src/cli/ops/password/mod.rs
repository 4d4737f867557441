use clap::{Args, Subcommand};

pub mod create;
pub mod revoke;
pub mod view;

use crate::cli::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (View, view::View),
    (Revoke, revoke::Revoke),
}

// Rename the generated Command to PasswordCommand for clarity
pub type PasswordCommand = Command;

/// Create, view and revoke password shares
#[derive(Args, Debug, Clone)]
pub struct Password {
    #[command(subcommand)]
    pub command: PasswordCommand,
}

#[async_trait::async_trait]
impl Op for Password {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
