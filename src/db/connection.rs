//! Database connection management

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| sqlx::Error::Configuration("DATABASE_URL is not set".into()))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
}

/// Test database connection
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
