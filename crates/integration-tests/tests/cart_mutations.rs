//! Integration tests for cart add/remove flows.
//!
//! These drive the real `CartService` against the in-memory gateway; stock
//! and quantity invariants, price recomputation, and boundary messages all
//! come from the production code paths.

use rust_decimal::Decimal;

use mercata_cart::{CartService, RequestContext};
use mercata_integration_tests::{MemoryGateway, RecordingViewCache, line_item, product};

fn service(
    gateway: &MemoryGateway,
    views: &RecordingViewCache,
) -> CartService<MemoryGateway, RecordingViewCache> {
    CartService::new(gateway.clone(), views.clone())
}

// ============================================================================
// Add Item
// ============================================================================

#[tokio::test]
async fn test_first_add_creates_cart_and_prices_it() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 5000, 5);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let result = service(&gateway, &views)
        .add_item_to_cart(&ctx, line_item(&mug))
        .await;

    assert!(result.success);
    assert_eq!(result.message, "Item added to cart successfully");

    let carts = gateway.carts();
    assert_eq!(carts.len(), 1);
    let cart = &carts[0];
    assert_eq!(cart.session_cart_id, "sess-1");
    assert_eq!(cart.user_id, None);
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].qty, 1);
    assert_eq!(cart.items_price, Decimal::new(5000, 2));
    assert_eq!(cart.shipping_price, Decimal::new(1000, 2));
    assert_eq!(cart.tax_price, Decimal::new(750, 2));
    assert_eq!(cart.total_price, Decimal::new(6750, 2));
}

#[tokio::test]
async fn test_adding_same_product_merges_into_one_line() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;
    let result = service.add_item_to_cart(&ctx, line_item(&mug)).await;

    assert!(result.success);
    assert_eq!(result.message, "Enamel Mug updated in cart successfully");

    let carts = gateway.carts();
    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].items.len(), 1);
    assert_eq!(carts[0].items[0].qty, 2);
    assert_eq!(carts[0].items_price, Decimal::new(3300, 2));
}

#[tokio::test]
async fn test_merge_ignores_incoming_quantity() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;

    // A second submission asking for five units still increments by one
    let mut greedy = line_item(&mug);
    greedy.qty = 5;
    let result = service.add_item_to_cart(&ctx, greedy).await;

    assert!(result.success);
    assert_eq!(gateway.carts()[0].items[0].qty, 2);
}

#[tokio::test]
async fn test_add_fails_when_stock_is_exhausted() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 2);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;
    service.add_item_to_cart(&ctx, line_item(&mug)).await;

    let before = gateway.carts();
    let result = service.add_item_to_cart(&ctx, line_item(&mug)).await;

    assert!(!result.success);
    assert_eq!(result.message, "Product out of stock");
    // The failed call must not have touched the cart
    assert_eq!(gateway.carts(), before);
}

#[tokio::test]
async fn test_new_line_requires_stock() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    let pitcher = product("Stoneware Pitcher", "stoneware-pitcher", 5400, 0);
    gateway.insert_product(mug.clone());
    gateway.insert_product(pitcher.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;

    let result = service.add_item_to_cart(&ctx, line_item(&pitcher)).await;

    assert!(!result.success);
    assert_eq!(result.message, "Product out of stock");
    assert_eq!(gateway.carts()[0].items.len(), 1);
}

#[tokio::test]
async fn test_add_without_session_token_fails() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::default();
    let result = service(&gateway, &views)
        .add_item_to_cart(&ctx, line_item(&mug))
        .await;

    assert!(!result.success);
    assert_eq!(result.message, "Cart session not found");
    assert!(gateway.carts().is_empty());
}

#[tokio::test]
async fn test_add_unknown_product_fails() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    // Product never inserted into the catalog
    let ghost = product("Ghost", "ghost", 999, 3);

    let ctx = RequestContext::anonymous("sess-1");
    let result = service(&gateway, &views)
        .add_item_to_cart(&ctx, line_item(&ghost))
        .await;

    assert!(!result.success);
    assert_eq!(result.message, "Product not found");
    assert!(gateway.carts().is_empty());
}

#[tokio::test]
async fn test_invalid_item_is_rejected_before_any_write() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let mut item = line_item(&mug);
    item.qty = 0;
    let result = service(&gateway, &views).add_item_to_cart(&ctx, item).await;

    assert!(!result.success);
    assert_eq!(result.message, "Quantity must be at least 1");
    assert!(gateway.carts().is_empty());
    assert!(views.paths().is_empty());
}

// ============================================================================
// Remove Item
// ============================================================================

#[tokio::test]
async fn test_remove_decrements_quantity() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;
    service.add_item_to_cart(&ctx, line_item(&mug)).await;

    let result = service.remove_item_from_cart(&ctx, mug.id).await;

    assert!(result.success);
    assert_eq!(result.message, "Enamel Mug updated in cart successfully");
    assert_eq!(gateway.carts()[0].items[0].qty, 1);
}

#[tokio::test]
async fn test_removing_last_unit_empties_cart_and_zeroes_prices() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;

    let result = service.remove_item_from_cart(&ctx, mug.id).await;

    assert!(result.success);
    assert_eq!(result.message, "Enamel Mug removed from cart successfully");

    let carts = gateway.carts();
    assert!(carts[0].items.is_empty());
    assert_eq!(carts[0].items_price.to_string(), "0.00");
    assert_eq!(carts[0].shipping_price.to_string(), "0.00");
    assert_eq!(carts[0].tax_price.to_string(), "0.00");
    assert_eq!(carts[0].total_price.to_string(), "0.00");
}

#[tokio::test]
async fn test_remove_from_emptied_cart_reports_item_not_found() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;
    service.remove_item_from_cart(&ctx, mug.id).await;

    let result = service.remove_item_from_cart(&ctx, mug.id).await;

    assert!(!result.success);
    assert_eq!(result.message, "Item not found");
}

#[tokio::test]
async fn test_remove_without_cart_fails() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let result = service(&gateway, &views)
        .remove_item_from_cart(&ctx, mug.id)
        .await;

    assert!(!result.success);
    assert_eq!(result.message, "Cart not found");
}

// ============================================================================
// Boundary Behavior
// ============================================================================

#[tokio::test]
async fn test_storage_failure_surfaces_generic_message() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());
    gateway.fail_storage();

    let ctx = RequestContext::anonymous("sess-1");
    let result = service(&gateway, &views)
        .add_item_to_cart(&ctx, line_item(&mug))
        .await;

    assert!(!result.success);
    assert_eq!(result.message, "Something went wrong. Please try again.");
}

#[tokio::test]
async fn test_mutations_invalidate_the_product_page() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 24);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    service.add_item_to_cart(&ctx, line_item(&mug)).await;
    service.remove_item_from_cart(&ctx, mug.id).await;

    assert_eq!(
        views.paths(),
        vec!["/product/enamel-mug", "/product/enamel-mug"]
    );
}

#[tokio::test]
async fn test_failed_mutation_invalidates_nothing() {
    let gateway = MemoryGateway::default();
    let views = RecordingViewCache::default();
    let mug = product("Enamel Mug", "enamel-mug", 1650, 0);
    gateway.insert_product(mug.clone());

    let ctx = RequestContext::anonymous("sess-1");
    let service = service(&gateway, &views);
    // Build a cart for another product so the out-of-stock path is reached
    let tote = product("Canvas Tote", "canvas-tote", 2499, 10);
    gateway.insert_product(tote.clone());
    service.add_item_to_cart(&ctx, line_item(&tote)).await;
    let invalidations_before = views.paths().len();

    let result = service.add_item_to_cart(&ctx, line_item(&mug)).await;

    assert!(!result.success);
    assert_eq!(views.paths().len(), invalidations_before);
}
