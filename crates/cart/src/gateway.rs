//! Persistence gateway contract.
//!
//! The mutation service is generic over this trait; the PostgreSQL
//! implementation lives in [`crate::db`], and the integration tests provide
//! an in-memory one. All methods are read-or-write against a single row -
//! the service sequences them, the gateway does not.

use mercata_core::{CartId, ProductId};

use crate::context::CartIdentity;
use crate::db::RepositoryError;
use crate::models::{Cart, CartItem, NewCart, Product};
use crate::pricing::PriceBreakdown;

/// Storage operations the cart service depends on.
#[allow(async_fn_in_trait)]
pub trait CartGateway {
    /// Find the cart for a resolved identity.
    ///
    /// Absence of a cart is `Ok(None)` - callers decide whether to create
    /// one.
    async fn find_cart(&self, identity: &CartIdentity)
    -> Result<Option<Cart>, RepositoryError>;

    /// Create a cart row, assigning its ID and creation timestamp.
    async fn create_cart(&self, cart: NewCart) -> Result<Cart, RepositoryError>;

    /// Rewrite a cart's items and all four price fields in one write.
    async fn update_cart(
        &self,
        id: CartId,
        items: &[CartItem],
        totals: &PriceBreakdown,
    ) -> Result<(), RepositoryError>;

    /// Look up the catalog product a mutation refers to.
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}
