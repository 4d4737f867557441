use std::path::PathBuf;

use common::service::ViewLimits;

use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Config {
    // data store configuration
    /// a path to a sqlite database, if not set then an
    ///  in-memory database will be used
    pub sqlite_path: Option<PathBuf>,

    // share configuration
    /// bounds on password share view budgets
    pub view_limits: ViewLimits,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stderr only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sqlite_path: None,
            view_limits: ViewLimits::default(),
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}

impl Config {
    /// Build the runtime configuration for an initialized onetime directory
    pub fn from_app_state(state: &AppState, log_dir: Option<PathBuf>) -> Self {
        Self {
            sqlite_path: Some(state.db_path.clone()),
            view_limits: state.config.view_limits(),
            log_level: state.config.tracing_level(),
            log_dir,
        }
    }
}
