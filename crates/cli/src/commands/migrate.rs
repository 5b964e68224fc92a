//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shelf migrate
//! ```
//!
//! # Migration Files
//!
//! Catalog migrations live in `crates/admin/migrations/`:
//! ```text
//! migrations/
//! └── 20261016000001_create_catalog.sql
//! ```

use super::{CommandError, connect};

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the connection or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running catalog migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
