//! Cart mutation service.
//!
//! Orchestrates add/remove operations: validates input, resolves the owning
//! cart, applies merge/decrement rules against product stock, recomputes the
//! price breakdown, and persists items and prices together. Both mutations
//! are total functions at the boundary - every failure becomes a
//! [`CartActionResult`] with `success: false`.
//!
//! # Known limitation
//!
//! The fetch-mutate-write sequence holds no lock and carries no version
//! check, so two concurrent mutations of the same cart can race and the last
//! write wins. The single-statement update keeps items and prices mutually
//! consistent either way.

mod error;

pub use error::{CartActionResult, CartError};

use tracing::instrument;

use mercata_core::ProductId;

use crate::cache::ViewCache;
use crate::context::{CartIdentity, RequestContext};
use crate::gateway::CartGateway;
use crate::models::{Cart, CartItem, NewCart, Product};
use crate::pricing;
use crate::validate;

/// The path whose cached renderings a product mutation invalidates.
fn product_path(slug: &str) -> String {
    format!("/product/{slug}")
}

/// Cart mutation service.
///
/// Generic over the persistence gateway and the view-invalidation hook so
/// callers can wire the PostgreSQL gateway in production and in-memory
/// doubles in tests.
pub struct CartService<G, V> {
    gateway: G,
    views: V,
}

impl<G: CartGateway, V: ViewCache> CartService<G, V> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(gateway: G, views: V) -> Self {
        Self { gateway, views }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fetch the current shopper's cart, if any.
    ///
    /// Resolution prefers the authenticated owner over the session token.
    /// A missing session token or a failed lookup yields `None`.
    #[instrument(skip(self, ctx))]
    pub async fn get_my_cart(&self, ctx: &RequestContext) -> Option<Cart> {
        let identity = CartIdentity::resolve(ctx).ok()?;
        match self.gateway.find_cart(&identity).await {
            Ok(cart) => cart,
            Err(error) => {
                tracing::warn!(%error, "cart lookup failed");
                None
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add an item to the shopper's cart, creating the cart on first add.
    ///
    /// Adding a product already in the cart increments its quantity by
    /// exactly one per call; the incoming item's own `qty` only applies to a
    /// line the cart does not have yet.
    #[instrument(skip(self, ctx, item), fields(product_id = %item.product_id))]
    pub async fn add_item_to_cart(&self, ctx: &RequestContext, item: CartItem) -> CartActionResult {
        match self.try_add_item(ctx, item).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(%error, "add to cart failed");
                CartActionResult::from_error(&error)
            }
        }
    }

    /// Remove one unit of a product from the shopper's cart.
    ///
    /// A quantity-one line is deleted outright; otherwise the quantity
    /// decrements by one.
    #[instrument(skip(self, ctx))]
    pub async fn remove_item_from_cart(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
    ) -> CartActionResult {
        match self.try_remove_item(ctx, product_id).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(%error, "remove from cart failed");
                CartActionResult::from_error(&error)
            }
        }
    }

    async fn try_add_item(
        &self,
        ctx: &RequestContext,
        item: CartItem,
    ) -> Result<CartActionResult, CartError> {
        let identity = CartIdentity::resolve(ctx)?;
        validate::cart_item(&item)?;

        let cart = self.gateway.find_cart(&identity).await?;
        let product = self
            .gateway
            .find_product(item.product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        let Some(mut cart) = cart else {
            return self.create_cart_with(ctx, item, &product).await;
        };

        let updated_existing =
            match cart.items.iter_mut().find(|x| x.product_id == item.product_id) {
                Some(existing) => {
                    if i64::from(product.stock) < i64::from(existing.qty) + 1 {
                        return Err(CartError::OutOfStock);
                    }
                    existing.qty += 1;
                    true
                }
                None => {
                    if product.stock < 1 {
                        return Err(CartError::OutOfStock);
                    }
                    cart.items.push(item);
                    false
                }
            };

        let totals = pricing::price_items(&cart.items);
        self.gateway
            .update_cart(cart.id, &cart.items, &totals)
            .await?;
        self.views.invalidate(&product_path(&product.slug)).await;

        tracing::debug!(cart_id = %cart.id, updated_existing, "cart item added");
        Ok(CartActionResult::ok(format!(
            "{} {} cart successfully",
            product.name,
            if updated_existing {
                "updated in"
            } else {
                "added to"
            }
        )))
    }

    /// First add for this shopper: create the cart with the item as its only
    /// line.
    async fn create_cart_with(
        &self,
        ctx: &RequestContext,
        item: CartItem,
        product: &Product,
    ) -> Result<CartActionResult, CartError> {
        let totals = pricing::price_items(std::slice::from_ref(&item));
        let cart = self
            .gateway
            .create_cart(NewCart {
                session_cart_id: ctx.session_cart_id()?.to_string(),
                user_id: ctx.user_id,
                items: vec![item],
                totals,
            })
            .await?;
        self.views.invalidate(&product_path(&product.slug)).await;

        tracing::debug!(cart_id = %cart.id, "cart created");
        Ok(CartActionResult::ok("Item added to cart successfully"))
    }

    async fn try_remove_item(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
    ) -> Result<CartActionResult, CartError> {
        let identity = CartIdentity::resolve(ctx)?;

        let product = self
            .gateway
            .find_product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;
        let mut cart = self
            .gateway
            .find_cart(&identity)
            .await?
            .ok_or(CartError::CartNotFound)?;

        let existing_qty = cart
            .items
            .iter()
            .find(|x| x.product_id == product_id)
            .map(|x| x.qty)
            .ok_or(CartError::ItemNotFound)?;

        let removed = existing_qty == 1;
        if removed {
            cart.items.retain(|x| x.product_id != product_id);
        } else if let Some(existing) = cart.items.iter_mut().find(|x| x.product_id == product_id) {
            existing.qty -= 1;
        }

        let totals = pricing::price_items(&cart.items);
        self.gateway
            .update_cart(cart.id, &cart.items, &totals)
            .await?;
        self.views.invalidate(&product_path(&product.slug)).await;

        tracing::debug!(cart_id = %cart.id, removed, "cart item removed");
        Ok(CartActionResult::ok(format!(
            "{} {} cart successfully",
            product.name,
            if removed { "removed from" } else { "updated in" }
        )))
    }
}
