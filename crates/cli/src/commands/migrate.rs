//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mercata migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CART_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migration files live in `crates/cart/migrations/` and are embedded into
//! the binary at compile time.

use thiserror::Error;
use tracing::info;

use mercata_cart::config::{CartConfig, ConfigError};
use mercata_cart::db;

/// Errors that can occur while running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the cart database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing, the database is
/// unreachable, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let config = CartConfig::from_env()?;

    info!("Connecting to cart database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running cart migrations...");
    db::run_migrations(&pool).await?;

    info!("Cart migrations complete!");
    Ok(())
}
