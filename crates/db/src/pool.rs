//! Postgres connection pool and migrations.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// How to reach the database.
#[derive(Clone)]
pub struct PoolSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolSettings {
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    /// `database_url` with any password replaced, for logging.
    pub fn redacted_url(&self) -> String {
        let url = &self.database_url;
        let (Some(scheme_end), Some(at)) = (url.find("://"), url.rfind('@')) else {
            return url.clone();
        };
        let authority_start = scheme_end + 3;
        if at <= authority_start {
            return url.clone();
        }
        let userinfo = &url[authority_start..at];
        match userinfo.split_once(':') {
            Some((user, _)) => format!("{}{user}:***{}", &url[..scheme_end + 3], &url[at..]),
            None => url.clone(),
        }
    }
}

/// Open a pool against `settings.database_url`.
pub async fn create_pool(settings: &PoolSettings) -> Result<DbPool, DbError> {
    info!(
        url = %settings.redacted_url(),
        max_connections = settings.max_connections,
        "Connecting to database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

/// Run the embedded migrations from `migrations/` at the workspace root.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
