//! Database operations for the cart `PostgreSQL` schema.
//!
//! # Tables
//!
//! - `cart` - One row per cart; `items` is a JSONB array of line items and
//!   the four price columns are `NUMERIC(12, 2)` derived from it.
//! - `product` - The catalog slice cart mutations read (and the seed command
//!   writes).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/cart/migrations/` and run via:
//! ```bash
//! cargo run -p mercata-cli -- migrate
//! ```

pub mod carts;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use mercata_core::{CartId, ProductId};

use crate::context::CartIdentity;
use crate::gateway::CartGateway;
use crate::models::{Cart, CartItem, NewCart, Product};
use crate::pricing::PriceBreakdown;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded cart migrations against a pool.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// The production [`CartGateway`]: cart and product repositories over one
/// connection pool.
#[derive(Clone)]
pub struct PgCartGateway {
    pool: PgPool,
}

impl PgCartGateway {
    /// Create a gateway over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CartGateway for PgCartGateway {
    async fn find_cart(
        &self,
        identity: &CartIdentity,
    ) -> Result<Option<Cart>, RepositoryError> {
        carts::CartRepository::new(&self.pool)
            .find_by_identity(identity)
            .await
    }

    async fn create_cart(&self, cart: NewCart) -> Result<Cart, RepositoryError> {
        carts::CartRepository::new(&self.pool).create(cart).await
    }

    async fn update_cart(
        &self,
        id: CartId,
        items: &[CartItem],
        totals: &PriceBreakdown,
    ) -> Result<(), RepositoryError> {
        carts::CartRepository::new(&self.pool)
            .update(id, items, totals)
            .await
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        products::ProductRepository::new(&self.pool)
            .get_by_id(id)
            .await
    }
}
