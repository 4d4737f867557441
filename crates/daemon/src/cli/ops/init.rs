use clap::Args;

use onetime_daemon::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Base URL share links are built on (default: http://localhost:8080)
    #[arg(long)]
    pub public_url: Option<String>,

    /// View budget for password shares created without --views (default: 1)
    #[arg(long)]
    pub default_views: Option<u32>,

    /// Largest view budget a password share may request (default: 100)
    #[arg(long)]
    pub max_views: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            public_url: self.public_url.clone().unwrap_or(defaults.public_url),
            default_views: self.default_views.unwrap_or(defaults.default_views),
            max_views: self.max_views.unwrap_or(defaults.max_views),
            log_level: defaults.log_level,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized onetime directory at: {}\n\
             - Database: {}\n\
             - Config: {}\n\
             - Public URL: {}\n\
             - Views: default {}, max {}",
            state.onetime_dir.display(),
            state.db_path.display(),
            state.config_path.display(),
            state.config.public_url,
            state.config.default_views,
            state.config.max_views,
        );

        Ok(output)
    }
}
