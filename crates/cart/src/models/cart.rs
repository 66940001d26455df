//! Cart and line-item domain types.
//!
//! Field names serialize in camelCase - the persisted JSON shape is read by
//! the storefront and admin view layers and must stay stable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercata_core::{CartId, ProductId, UserId};

use crate::pricing::PriceBreakdown;

/// A single cart line: a product reference plus quantity and the unit price
/// captured at add-time.
///
/// Display fields (`name`, `slug`, `image`) are denormalized from the product
/// when the item is added; they are not re-fetched from the catalog on each
/// view. A cart holds at most one line per `product_id` - quantity changes
/// mutate the existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Product slug at add-time (used for view invalidation paths).
    pub slug: String,
    /// Product image URL at add-time.
    pub image: String,
    /// Unit price at add-time, two decimal digits.
    pub price: Decimal,
    /// Quantity, always >= 1.
    pub qty: u32,
}

/// A persisted cart.
///
/// Belongs to an anonymous browsing session (`session_cart_id`) and
/// optionally to an authenticated user. The four price fields are derived
/// from `items` and are rewritten together with `items` in a single
/// statement - they are never independently mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Unique cart ID, assigned at creation.
    pub id: CartId,
    /// Token identifying the anonymous browsing session.
    pub session_cart_id: String,
    /// Authenticated owner, absent for anonymous carts.
    pub user_id: Option<UserId>,
    /// Line items in insertion order.
    pub items: Vec<CartItem>,
    /// Sum of line totals, two decimal digits.
    pub items_price: Decimal,
    /// Flat shipping charge, two decimal digits.
    pub shipping_price: Decimal,
    /// Tax on `items_price`, two decimal digits.
    pub tax_price: Decimal,
    /// `items_price + shipping_price + tax_price`, two decimal digits.
    pub total_price: Decimal,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Find a line item by product.
    #[must_use]
    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|x| x.product_id == product_id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|x| x.qty).sum()
    }
}

/// Input for creating a cart row.
///
/// The gateway assigns the ID and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewCart {
    /// Anonymous session token the cart belongs to.
    pub session_cart_id: String,
    /// Authenticated owner, if the shopper is signed in.
    pub user_id: Option<UserId>,
    /// Initial line items.
    pub items: Vec<CartItem>,
    /// Price breakdown computed from `items`.
    pub totals: PriceBreakdown,
}
