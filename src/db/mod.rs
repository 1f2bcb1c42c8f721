//! Database module
//!
//! This module handles database connections, migrations, and the store
//! implementations the services are built on.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;
use tracing::info;

use crate::{
    config::{Config, StoreBackend},
    error::{AppError, AppResult},
};

pub use connection::*;
pub use repositories::Stores;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Open the stores selected by the configuration
pub async fn connect_stores(config: &Config) -> AppResult<Stores> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory stores");
            Ok(Stores::in_memory())
        }
        StoreBackend::Postgres => {
            if config.database.url.is_none() {
                return Err(AppError::Configuration(
                    "DATABASE_URL is required for the postgres store".to_string(),
                ));
            }

            info!("Connecting to database...");
            let pool = create_pool(&config.database).await?;
            test_connection(&pool).await?;

            info!("Running database migrations...");
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::StoreUnavailable(format!("Migration failed: {}", e)))?;

            Ok(Stores::postgres(pool))
        }
    }
}
