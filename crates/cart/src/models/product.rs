//! Catalog product view used by cart mutations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercata_core::ProductId;

/// The slice of a catalog product the cart subsystem reads.
///
/// Catalog administration owns the full product record; mutations here only
/// need identity, display fields, the list price, and purchasable stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug; cart mutations invalidate `/product/{slug}`.
    pub slug: String,
    /// Current list price, two decimal digits.
    pub price: Decimal,
    /// Maximum purchasable quantity right now.
    pub stock: i32,
}
