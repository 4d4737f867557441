use clap::{Args, Subcommand};

pub mod complete;
pub mod create;
pub mod delete;
pub mod show;

use crate::cli::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (Complete, complete::Complete),
    (Show, show::Show),
    (Delete, delete::Delete),
}

// Rename the generated Command to KeyCommand for clarity
pub type KeyCommand = Command;

/// Request, submit, inspect and delete public key shares
#[derive(Args, Debug, Clone)]
pub struct Key {
    #[command(subcommand)]
    pub command: KeyCommand,
}

#[async_trait::async_trait]
impl Op for Key {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
