use std::time::Duration;

use clap::Args;
use tokio::time::timeout;

use onetime_daemon::state::AppState;
use onetime_daemon::{ServiceConfig, ServiceState};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Health check failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut lines = Vec::new();

        // 1. Check config directory
        lines.push("Config:".to_string());
        let state = match AppState::load(ctx.config_path.clone()) {
            Ok(state) => {
                lines.push(format!("  directory:     {}", state.onetime_dir.display()));
                lines.push("  config.toml:   OK".to_string());
                lines.push("  db.sqlite:     OK".to_string());
                lines.push(format!("  public_url:    {}", state.config.public_url));
                lines.push(format!(
                    "  views:         default {}, max {}",
                    state.config.default_views, state.config.max_views
                ));
                state
            }
            Err(e) => {
                lines.push(format!("  error: {}", e));
                return Err(HealthError::Failed(lines.join("\n")));
            }
        };

        // 2. Check database readiness
        lines.push(String::new());
        lines.push("Database:".to_string());
        let config = ServiceConfig::from_app_state(&state, None);
        let ready = match ServiceState::from_config(&config).await {
            Ok(services) => match timeout(HEALTH_CHECK_TIMEOUT, services.database().is_ready()).await
            {
                Ok(Ok(())) => {
                    lines.push("  readyz: OK".to_string());
                    true
                }
                Ok(Err(e)) => {
                    lines.push(format!("  readyz: UNHEALTHY ({})", e));
                    false
                }
                Err(_) => {
                    lines.push("  readyz: TIMED OUT".to_string());
                    false
                }
            },
            Err(e) => {
                lines.push(format!("  readyz: NOT AVAILABLE ({})", e));
                false
            }
        };

        if ready {
            Ok(lines.join("\n"))
        } else {
            Err(HealthError::Failed(lines.join("\n")))
        }
    }
}
