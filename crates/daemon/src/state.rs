use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use common::service::{ViewLimits, DEFAULT_MAX_VIEWS, DEFAULT_VIEWS};

pub const APP_NAME: &str = "onetime";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL share links are built on
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// View budget for password shares created without one
    #[serde(default = "default_views")]
    pub default_views: u32,
    /// Largest view budget a password share may request
    #[serde(default = "default_max_views")]
    pub max_views: u32,
    /// Default log level, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_views() -> u32 {
    DEFAULT_VIEWS
}

fn default_max_views() -> u32 {
    DEFAULT_MAX_VIEWS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            public_url: default_public_url(),
            default_views: default_views(),
            max_views: default_max_views(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn view_limits(&self) -> ViewLimits {
        ViewLimits {
            default_views: self.default_views,
            max_views: self.max_views,
        }
    }

    /// Parse the configured log level, falling back to INFO.
    ///
    /// Loaded configs are validated, so the fallback only covers configs
    /// built in code.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// Link a consumer opens to view a password share.
    ///
    /// The salt travels in the fragment so it never reaches a server log.
    pub fn password_link(&self, id: &uuid::Uuid, salt: &str) -> String {
        format!("{}/p/{}#{}", self.public_url.trim_end_matches('/'), id, salt)
    }

    /// Link a consumer opens to submit their public key
    pub fn key_link(&self, id: &uuid::Uuid) -> String {
        format!("{}/k/{}", self.public_url.trim_end_matches('/'), id)
    }

    fn validate(&self) -> Result<(), StateError> {
        if self.max_views == 0 {
            return Err(StateError::InvalidConfig(
                "max_views must be at least 1".to_string(),
            ));
        }
        if self.default_views == 0 || self.default_views > self.max_views {
            return Err(StateError::InvalidConfig(format!(
                "default_views must be between 1 and max_views ({})",
                self.max_views
            )));
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(StateError::InvalidConfig(format!(
                "unknown log_level: {}",
                self.log_level
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the onetime directory (~/.onetime)
    pub onetime_dir: PathBuf,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the onetime directory path (custom or default ~/.onetime)
    pub fn onetime_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new onetime state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let onetime_dir = Self::onetime_dir(custom_path)?;

        if onetime_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        let config = config.unwrap_or_default();
        config.validate()?;

        fs::create_dir_all(&onetime_dir)?;

        let config_path = onetime_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // Create empty database (just touch the file, migrations run on first connect)
        let db_path = onetime_dir.join(DB_FILE_NAME);
        fs::write(&db_path, "")?;

        Ok(Self {
            onetime_dir,
            db_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the onetime directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let onetime_dir = Self::onetime_dir(custom_path)?;

        if !onetime_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = onetime_dir.join(DB_FILE_NAME);
        let config_path = onetime_dir.join(CONFIG_FILE_NAME);

        if !db_path.exists() {
            return Err(StateError::MissingFile(DB_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;
        config.validate()?;

        Ok(Self {
            onetime_dir,
            db_path,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("onetime directory not initialized. Run 'onetime init' first")]
    NotInitialized,

    #[error("onetime directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("onetime");

        let config = AppConfig {
            public_url: "https://share.example.com/".to_string(),
            max_views: 10,
            ..Default::default()
        };
        let created = AppState::init(Some(dir.clone()), Some(config.clone())).unwrap();
        assert!(created.db_path.exists());
        assert!(created.config_path.exists());

        let loaded = AppState::load(Some(dir)).unwrap();
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.config.view_limits().max_views, 10);
    }

    #[test]
    fn test_init_twice_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("onetime");
        AppState::init(Some(dir.clone()), None).unwrap();
        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_uninitialized() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppState::load(Some(tmp.path().join("missing"))),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("public_url = \"https://x.test\"").unwrap();
        assert_eq!(config.public_url, "https://x.test");
        assert_eq!(config.default_views, 1);
        assert_eq!(config.max_views, 100);
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_invalid_limits_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            default_views: 5,
            max_views: 2,
            ..Default::default()
        };
        assert!(matches!(
            AppState::init(Some(tmp.path().join("onetime")), Some(config)),
            Err(StateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("onetime");
        AppState::init(Some(dir.clone()), None).unwrap();

        fs::write(dir.join(CONFIG_FILE_NAME), "log_level = \"chatty\"\n").unwrap();
        assert!(matches!(
            AppState::load(Some(dir.clone())),
            Err(StateError::InvalidConfig(_))
        ));

        fs::write(dir.join(CONFIG_FILE_NAME), "log_level = \"debug\"\n").unwrap();
        let loaded = AppState::load(Some(dir)).unwrap();
        assert_eq!(loaded.config.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_links() {
        let config = AppConfig {
            public_url: "https://share.example.com/".to_string(),
            ..Default::default()
        };
        let id = uuid::Uuid::nil();
        assert_eq!(
            config.password_link(&id, "salt"),
            "https://share.example.com/p/00000000-0000-0000-0000-000000000000#salt"
        );
        assert_eq!(
            config.key_link(&id),
            "https://share.example.com/k/00000000-0000-0000-0000-000000000000"
        );
    }
}
