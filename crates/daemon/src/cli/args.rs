pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "onetime")]
#[command(about = "Share secrets that can be read a limited number of times, and collect public keys")]
#[command(version)]
pub struct Args {
    /// Path to the onetime config directory (defaults to ~/.onetime)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Directory for log files (logs to stderr only if not set)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
