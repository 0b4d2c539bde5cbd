//! Postgres connection pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// The one pool shared by every request.
pub type DbPool = PgPool;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`DbPool`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// How long a query waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }

    /// Open the pool, failing fast if the database is unreachable.
    pub async fn connect(&self) -> Result<DbPool, DbError> {
        info!(
            max_connections = self.max_connections,
            "connecting to database"
        );
        Ok(self.options().connect(&self.database_url).await?)
    }

    /// Build the pool without connecting; connections open on first use.
    pub fn connect_lazy(&self) -> Result<DbPool, DbError> {
        Ok(self.options().connect_lazy(&self.database_url)?)
    }
}

/// Apply the workspace `migrations/` embedded at build time.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(count = migrator.iter().count(), "applying migrations");
    migrator.run(pool).await?;
    Ok(())
}
