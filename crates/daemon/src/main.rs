// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Health, Init, Key, Password, Version};

command_enum! {
    (Init, Init),
    (Health, Health),
    (Password, Password),
    (Key, Key),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let ctx = cli::op::OpContext::new(args.config_path, args.log_dir);
    let guards = onetime_daemon::init_logging(&ctx.service_config());

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            // flush the non-blocking log writers before exiting
            drop(guards);
            std::process::exit(1);
        }
    }
}
