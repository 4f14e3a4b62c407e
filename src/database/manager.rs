use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Tables backing the repositories. No unique constraint on
/// (user_id, commons_id): the join handler checks before inserting.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS commons (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        cow_price DOUBLE PRECISION NOT NULL DEFAULT 0,
        milk_price DOUBLE PRECISION NOT NULL DEFAULT 0,
        starting_balance DOUBLE PRECISION NOT NULL DEFAULT 0,
        start_date TIMESTAMPTZ,
        end_date TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_commons (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL,
        commons_id BIGINT NOT NULL,
        total_wealth DOUBLE PRECISION NOT NULL DEFAULT 0,
        avg_cow_health DOUBLE PRECISION NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS user_commons_commons_user_idx ON user_commons (commons_id, user_id)",
];

/// Owns the connection pool for the configured database
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connect using the configured URL and pool settings
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Create tables if they do not exist yet
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        }
        info!("Database schema is up to date");
        Ok(())
    }
}
