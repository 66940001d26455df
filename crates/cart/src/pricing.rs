//! Price computation for cart line items.
//!
//! A pure function from an ordered sequence of line items to the four derived
//! price fields. Every intermediate value is rounded to two decimal digits,
//! not only the end result, so repeated additions cannot drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercata_core::round2;

use crate::models::CartItem;

/// Orders above this subtotal ship free.
const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping charge below the free-shipping threshold.
const FLAT_SHIPPING_PRICE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Flat tax rate applied to the item subtotal.
const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// The four derived price fields of a cart, each at exactly two decimal
/// digits.
///
/// Serializes every field as a fixed two-decimal string (`"67.50"`), the
/// shape the persisted cart row and the view layers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Sum of `price * qty` over all lines.
    pub items_price: Decimal,
    /// Flat shipping charge, zero above the free-shipping threshold.
    pub shipping_price: Decimal,
    /// Tax on `items_price`.
    pub tax_price: Decimal,
    /// `items_price + shipping_price + tax_price`.
    pub total_price: Decimal,
}

impl PriceBreakdown {
    /// The breakdown of a cart with no items: every field `0.00`.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            items_price: round2(Decimal::ZERO),
            shipping_price: round2(Decimal::ZERO),
            tax_price: round2(Decimal::ZERO),
            total_price: round2(Decimal::ZERO),
        }
    }
}

/// Compute the price breakdown for a sequence of line items.
///
/// An empty sequence yields the all-zero breakdown - an emptied cart carries
/// no shipping or tax.
#[must_use]
pub fn price_items(items: &[CartItem]) -> PriceBreakdown {
    if items.is_empty() {
        return PriceBreakdown::zero();
    }

    let items_price = round2(
        items
            .iter()
            .map(|item| item.price * Decimal::from(item.qty))
            .sum(),
    );
    let shipping_price = round2(if items_price > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_PRICE
    });
    let tax_price = round2(TAX_RATE * items_price);
    let total_price = round2(items_price + shipping_price + tax_price);

    PriceBreakdown {
        items_price,
        shipping_price,
        tax_price,
        total_price,
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use mercata_core::ProductId;

    use super::*;

    fn item(price: Decimal, qty: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(Uuid::new_v4()),
            name: "Enamel Mug".to_string(),
            slug: "enamel-mug".to_string(),
            image: "/images/enamel-mug.jpg".to_string(),
            price,
            qty,
        }
    }

    #[test]
    fn test_single_item_breakdown() {
        // 50.00 subtotal: flat shipping applies, 15% tax
        let breakdown = price_items(&[item(Decimal::new(5000, 2), 1)]);
        assert_eq!(breakdown.items_price, Decimal::new(5000, 2));
        assert_eq!(breakdown.shipping_price, Decimal::new(1000, 2));
        assert_eq!(breakdown.tax_price, Decimal::new(750, 2));
        assert_eq!(breakdown.total_price, Decimal::new(6750, 2));
    }

    #[test]
    fn test_shipping_free_above_threshold() {
        let breakdown = price_items(&[item(Decimal::new(10001, 2), 1)]);
        assert_eq!(breakdown.shipping_price, Decimal::ZERO);
    }

    #[test]
    fn test_shipping_charged_at_threshold() {
        // Exactly 100 is not "above" the threshold
        let breakdown = price_items(&[item(Decimal::new(10000, 2), 1)]);
        assert_eq!(breakdown.shipping_price, Decimal::new(1000, 2));
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let breakdown = price_items(&[
            item(Decimal::new(1999, 2), 3),
            item(Decimal::new(499, 2), 2),
        ]);
        assert_eq!(
            breakdown.total_price,
            round2(breakdown.items_price + breakdown.shipping_price + breakdown.tax_price)
        );
    }

    #[test]
    fn test_tax_midpoint_rounds_up() {
        // 16.30 * 0.15 = 2.445, which must round to 2.45 rather than 2.44
        let breakdown = price_items(&[item(Decimal::new(1630, 2), 1)]);
        assert_eq!(breakdown.tax_price, Decimal::new(245, 2));
    }

    #[test]
    fn test_quantity_multiplies_line_total() {
        let breakdown = price_items(&[item(Decimal::new(2499, 2), 4)]);
        assert_eq!(breakdown.items_price, Decimal::new(9996, 2));
    }

    #[test]
    fn test_empty_items_price_to_zero() {
        let breakdown = price_items(&[]);
        assert_eq!(breakdown, PriceBreakdown::zero());
        assert_eq!(breakdown.total_price.to_string(), "0.00");
    }

    #[test]
    fn test_breakdown_serializes_as_two_decimal_strings() {
        let breakdown = price_items(&[item(Decimal::new(5000, 2), 1)]);
        let json = serde_json::to_value(&breakdown).expect("serialize");
        assert_eq!(json["itemsPrice"], "50.00");
        assert_eq!(json["shippingPrice"], "10.00");
        assert_eq!(json["taxPrice"], "7.50");
        assert_eq!(json["totalPrice"], "67.50");
    }
}
