//! CLI subcommands.

pub mod migrate;
pub mod seed;

use shelf_admin::config::{AdminConfig, ConfigError};
use shelf_admin::db;
use shelf_admin::factories::FactoryError;
use sqlx::PgPool;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Seeding failed: {0}")]
    Factory(#[from] FactoryError),
}

/// Connect to the catalog database named by the environment.
///
/// # Errors
///
/// Returns `CommandError` if configuration is missing or the connection fails.
pub async fn connect() -> Result<PgPool, CommandError> {
    let config = AdminConfig::from_env()?;
    tracing::info!("Connecting to catalog database...");
    Ok(db::create_pool(&config.database_url).await?)
}
