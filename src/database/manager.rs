use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the data access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection pool setup and schema migrations for the PostgreSQL backend
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool and verify the database answers
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        info!(
            "Connected to database {} (max {} connections)",
            config.name, config.max_connections
        );
        Ok(pool)
    }

    /// Apply the embedded migrations under ./migrations
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Migrations completed successfully");
        Ok(())
    }

    /// Use DATABASE_URL verbatim when given, otherwise assemble one from the DB_* parts
    fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        if let Some(url) = &config.url {
            let parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
            return Ok(parsed.into());
        }

        let mut url = url::Url::parse("postgres://localhost").map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_host(Some(&config.host))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_port(Some(config.port))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_username(&config.user)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !config.password.is_empty() {
            url.set_password(Some(&config.password))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        url.set_path(&format!("/{}", config.name));
        url.set_query(Some("sslmode=disable"));
        Ok(url.into())
    }
}
