use url::Url;

use common::service::{KeyShareService, PasswordShareService};

use crate::database::{Database, DatabaseSetupError};
use crate::service_config::Config;

/// Explicitly constructed services over one shared database pool
#[derive(Clone, Debug)]
pub struct State {
    database: Database,
    password_shares: PasswordShareService<Database>,
    key_shares: KeyShareService<Database>,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Setup database
        let sqlite_database_url = match config.sqlite_path {
            Some(ref path) => {
                // check that the path exists
                if !path.exists() {
                    return Err(StateSetupError::DatabasePathDoesNotExist);
                }
                // parse the path into a URL
                Url::parse(&format!("sqlite://{}", path.display()))
                    .map_err(|_| StateSetupError::InvalidDatabaseUrl)
            }
            // otherwise just set up an in-memory database
            None => Url::parse("sqlite::memory:").map_err(|_| StateSetupError::InvalidDatabaseUrl),
        }?;
        tracing::debug!("Database URL: {:?}", sqlite_database_url);
        let database = Database::connect(&sqlite_database_url).await?;

        // 2. Clear shares whose final delete never ran
        let purged = database
            .purge_exhausted_password_shares()
            .await
            .map_err(StateSetupError::Database)?;
        if purged > 0 {
            tracing::info!(purged, "removed exhausted password shares");
        }

        // 3. Wire the services to the store
        let password_shares =
            PasswordShareService::with_limits(database.clone(), config.view_limits);
        let key_shares = KeyShareService::new(database.clone());

        Ok(Self {
            database,
            password_shares,
            key_shares,
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn password_shares(&self) -> &PasswordShareService<Database> {
        &self.password_shares
    }

    pub fn key_shares(&self) -> &KeyShareService<Database> {
        &self.key_shares
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Database path does not exist")]
    DatabasePathDoesNotExist,
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,
    #[error("failed to setup the database: {0}")]
    DatabaseSetupError(#[from] DatabaseSetupError),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}
