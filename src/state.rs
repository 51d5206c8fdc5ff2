use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use sqlx::postgres::PgPool;

use crate::config::Config;
use crate::store::{DatabaseStore, RecordStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Record store backing the catalog
    pub store: Arc<dyn RecordStore>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState by connecting to PostgreSQL and running migrations
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        // Connect to PostgreSQL with SQLx (for migrations)
        let pg_pool = PgPool::connect(&config.database_url)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;
        pg_pool.close().await;

        // Connect to PostgreSQL with SeaORM
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(config.db_max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        Ok(Self {
            store: Arc::new(DatabaseStore::new(db)),
            config,
        })
    }

    /// Create AppState with a custom store (for testing)
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        Self { store, config }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
