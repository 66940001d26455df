//! Cart repository for database operations.
//!
//! Cart rows store line items as a JSONB array next to the four derived
//! price columns, so one `UPDATE` always rewrites both together. Queries use
//! the runtime API with explicit binds; row-to-domain conversion maps bad
//! stored JSON to `RepositoryError::DataCorruption`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mercata_core::{CartId, UserId, round2};

use super::RepositoryError;
use crate::context::CartIdentity;
use crate::models::{Cart, CartItem, NewCart};
use crate::pricing::PriceBreakdown;

/// Raw cart row as stored.
#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    session_cart_id: String,
    user_id: Option<UserId>,
    items: serde_json::Value,
    items_price: Decimal,
    shipping_price: Decimal,
    tax_price: Decimal,
    total_price: Decimal,
    created_at: DateTime<Utc>,
}

impl CartRow {
    /// Convert to the domain type, normalizing price fields to two decimal
    /// digits so they serialize display-ready.
    fn into_domain(self) -> Result<Cart, RepositoryError> {
        let items: Vec<CartItem> = serde_json::from_value(self.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid cart items in database: {e}"))
        })?;

        Ok(Cart {
            id: self.id,
            session_cart_id: self.session_cart_id,
            user_id: self.user_id,
            items,
            items_price: round2(self.items_price),
            shipping_price: round2(self.shipping_price),
            tax_price: round2(self.tax_price),
            total_price: round2(self.total_price),
            created_at: self.created_at,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a cart by its resolved identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored items are
    /// invalid.
    pub async fn find_by_identity(
        &self,
        identity: &CartIdentity,
    ) -> Result<Option<Cart>, RepositoryError> {
        let row = match identity {
            CartIdentity::User(user_id) => {
                sqlx::query_as::<_, CartRow>(
                    "SELECT id, session_cart_id, user_id, items, \
                         items_price, shipping_price, tax_price, total_price, created_at \
                     FROM cart \
                     WHERE user_id = $1 \
                     ORDER BY created_at ASC \
                     LIMIT 1",
                )
                .bind(*user_id)
                .fetch_optional(self.pool)
                .await?
            }
            CartIdentity::Session(token) => {
                sqlx::query_as::<_, CartRow>(
                    "SELECT id, session_cart_id, user_id, items, \
                         items_price, shipping_price, tax_price, total_price, created_at \
                     FROM cart \
                     WHERE session_cart_id = $1 \
                     ORDER BY created_at ASC \
                     LIMIT 1",
                )
                .bind(token.as_str())
                .fetch_optional(self.pool)
                .await?
            }
        };

        row.map(CartRow::into_domain).transpose()
    }

    /// Create a cart row, assigning a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the items cannot be
    /// serialized.
    pub async fn create(&self, cart: NewCart) -> Result<Cart, RepositoryError> {
        let items = serde_json::to_value(&cart.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize cart items: {e}"))
        })?;

        let row = sqlx::query_as::<_, CartRow>(
            "INSERT INTO cart (id, session_cart_id, user_id, items, \
                 items_price, shipping_price, tax_price, total_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, session_cart_id, user_id, items, \
                 items_price, shipping_price, tax_price, total_price, created_at",
        )
        .bind(CartId::new(Uuid::new_v4()))
        .bind(&cart.session_cart_id)
        .bind(cart.user_id)
        .bind(items)
        .bind(cart.totals.items_price)
        .bind(cart.totals.shipping_price)
        .bind(cart.totals.tax_price)
        .bind(cart.totals.total_price)
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }

    /// Rewrite a cart's items and price fields in a single statement.
    ///
    /// There is no version check: the last writer wins, matching the
    /// documented read-modify-write limitation of the mutation service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart no longer exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CartId,
        items: &[CartItem],
        totals: &PriceBreakdown,
    ) -> Result<(), RepositoryError> {
        let items = serde_json::to_value(items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize cart items: {e}"))
        })?;

        let result = sqlx::query(
            "UPDATE cart \
             SET items = $1, items_price = $2, shipping_price = $3, \
                 tax_price = $4, total_price = $5 \
             WHERE id = $6",
        )
        .bind(items)
        .bind(totals.items_price)
        .bind(totals.shipping_price)
        .bind(totals.tax_price)
        .bind(totals.total_price)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
