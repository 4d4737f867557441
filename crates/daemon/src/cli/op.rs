use std::error::Error;
use std::path::PathBuf;

use onetime_daemon::state::{AppState, StateError};
use onetime_daemon::{ServiceConfig, ServiceState, StateSetupError};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Setup(#[from] StateSetupError),
}

#[derive(Clone, Debug)]
pub struct OpContext {
    /// Optional custom config path (defaults to ~/.onetime)
    pub config_path: Option<PathBuf>,
    /// Optional directory for rolling log files
    pub log_dir: Option<PathBuf>,
}

impl OpContext {
    pub fn new(config_path: Option<PathBuf>, log_dir: Option<PathBuf>) -> Self {
        Self {
            config_path,
            log_dir,
        }
    }

    /// Runtime configuration for this invocation.
    ///
    /// Falls back to defaults when the onetime directory is not
    /// initialized yet, so `init` can still log.
    pub fn service_config(&self) -> ServiceConfig {
        match AppState::load(self.config_path.clone()) {
            Ok(state) => ServiceConfig::from_app_state(&state, self.log_dir.clone()),
            Err(_) => ServiceConfig {
                log_dir: self.log_dir.clone(),
                ..Default::default()
            },
        }
    }

    /// Load the onetime directory and connect the share services to its database
    pub async fn services(&self) -> Result<(AppState, ServiceState), ContextError> {
        let state = AppState::load(self.config_path.clone())?;
        let config = ServiceConfig::from_app_state(&state, self.log_dir.clone());
        let services = ServiceState::from_config(&config).await?;
        Ok((state, services))
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
