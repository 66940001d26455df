//! Input validation for incoming cart items.
//!
//! Validation is a pure function invoked before any side effect; a rejected
//! item never reaches the gateway.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::CartItem;

/// A malformed incoming cart item.
///
/// Messages are shown to shoppers verbatim, so they name the field rather
/// than the rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Product reference is the nil UUID.
    #[error("Product is required")]
    MissingProduct,

    /// Display name is empty.
    #[error("Name is required")]
    MissingName,

    /// Slug is empty.
    #[error("Slug is required")]
    MissingSlug,

    /// Image URL is empty.
    #[error("Image is required")]
    MissingImage,

    /// Quantity below one.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// Negative unit price.
    #[error("Price must not be negative")]
    NegativePrice,

    /// Unit price carries more than two decimal digits.
    #[error("Price must have at most two decimal places")]
    PriceScale,
}

/// Check a candidate cart item before it causes any side effect.
///
/// # Errors
///
/// Returns the first failing constraint: non-nil product id, non-empty
/// display fields, `qty >= 1`, and a non-negative price with at most two
/// decimal digits.
pub fn cart_item(item: &CartItem) -> Result<(), ValidationError> {
    if item.product_id.is_nil() {
        return Err(ValidationError::MissingProduct);
    }
    if item.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if item.slug.trim().is_empty() {
        return Err(ValidationError::MissingSlug);
    }
    if item.image.trim().is_empty() {
        return Err(ValidationError::MissingImage);
    }
    if item.qty < 1 {
        return Err(ValidationError::InvalidQuantity);
    }
    if item.price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice);
    }
    if item.price.scale() > 2 && item.price.normalize().scale() > 2 {
        return Err(ValidationError::PriceScale);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use mercata_core::ProductId;

    use super::*;

    fn valid_item() -> CartItem {
        CartItem {
            product_id: ProductId::new(Uuid::new_v4()),
            name: "Linen Apron".to_string(),
            slug: "linen-apron".to_string(),
            image: "/images/linen-apron.jpg".to_string(),
            price: Decimal::new(3250, 2),
            qty: 1,
        }
    }

    #[test]
    fn test_valid_item_passes() {
        assert_eq!(cart_item(&valid_item()), Ok(()));
    }

    #[test]
    fn test_nil_product_rejected() {
        let mut item = valid_item();
        item.product_id = ProductId::new(Uuid::nil());
        assert_eq!(cart_item(&item), Err(ValidationError::MissingProduct));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut item = valid_item();
        item.name = "   ".to_string();
        assert_eq!(cart_item(&item), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut item = valid_item();
        item.qty = 0;
        assert_eq!(cart_item(&item), Err(ValidationError::InvalidQuantity));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut item = valid_item();
        item.price = Decimal::new(-100, 2);
        assert_eq!(cart_item(&item), Err(ValidationError::NegativePrice));
    }

    #[test]
    fn test_three_decimal_price_rejected() {
        let mut item = valid_item();
        item.price = Decimal::new(12_345, 3);
        assert_eq!(cart_item(&item), Err(ValidationError::PriceScale));
    }

    #[test]
    fn test_trailing_zero_scale_accepted() {
        // 12.340 is numerically two decimal places
        let mut item = valid_item();
        item.price = Decimal::new(12_340, 3);
        assert_eq!(cart_item(&item), Ok(()));
    }

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(
            ValidationError::InvalidQuantity.to_string(),
            "Quantity must be at least 1"
        );
        assert_eq!(
            ValidationError::MissingProduct.to_string(),
            "Product is required"
        );
    }
}
