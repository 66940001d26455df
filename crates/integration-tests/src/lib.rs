//! Integration-test support for Mercata.
//!
//! The cart service is generic over its persistence gateway and view cache,
//! so these tests drive the real service against in-memory doubles:
//!
//! - [`MemoryGateway`] - cart and product storage in `Vec`s, with optional
//!   fault injection
//! - [`RecordingViewCache`] - records every invalidated path
//!
//! # Test Categories
//!
//! - `cart_mutations` - add/remove flows, stock and quantity invariants
//! - `cart_identity` - anonymous vs. authenticated cart resolution
//!
//! Run with: `cargo test -p mercata-integration-tests`

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use mercata_cart::db::RepositoryError;
use mercata_cart::{
    Cart, CartGateway, CartIdentity, CartItem, NewCart, PriceBreakdown, Product, ViewCache,
};
use mercata_core::{CartId, ProductId};

/// In-memory [`CartGateway`].
///
/// Cheaply cloneable; clones share state so tests can inspect storage after
/// handing a clone to the service.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<MemoryGatewayInner>,
}

#[derive(Default)]
struct MemoryGatewayInner {
    carts: Mutex<Vec<Cart>>,
    products: Mutex<Vec<Product>>,
    fail: AtomicBool,
}

impl MemoryGateway {
    /// Add a product to the in-memory catalog.
    pub fn insert_product(&self, product: Product) {
        self.inner.products.lock().expect("lock").push(product);
    }

    /// Snapshot of all stored carts.
    #[must_use]
    pub fn carts(&self) -> Vec<Cart> {
        self.inner.carts.lock().expect("lock").clone()
    }

    /// Make every subsequent gateway call fail, for boundary-message tests.
    pub fn fail_storage(&self) {
        self.inner.fail.store(true, Ordering::SeqCst);
    }

    fn check_fail(&self) -> Result<(), RepositoryError> {
        if self.inner.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::DataCorruption(
                "injected storage failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl CartGateway for MemoryGateway {
    async fn find_cart(&self, identity: &CartIdentity) -> Result<Option<Cart>, RepositoryError> {
        self.check_fail()?;
        let carts = self.inner.carts.lock().expect("lock");
        let found = match identity {
            CartIdentity::User(user_id) => {
                carts.iter().find(|c| c.user_id == Some(*user_id))
            }
            CartIdentity::Session(token) => {
                carts.iter().find(|c| c.session_cart_id == *token)
            }
        };
        Ok(found.cloned())
    }

    async fn create_cart(&self, cart: NewCart) -> Result<Cart, RepositoryError> {
        self.check_fail()?;
        let created = Cart {
            id: CartId::new(Uuid::new_v4()),
            session_cart_id: cart.session_cart_id,
            user_id: cart.user_id,
            items: cart.items,
            items_price: cart.totals.items_price,
            shipping_price: cart.totals.shipping_price,
            tax_price: cart.totals.tax_price,
            total_price: cart.totals.total_price,
            created_at: Utc::now(),
        };
        self.inner.carts.lock().expect("lock").push(created.clone());
        Ok(created)
    }

    async fn update_cart(
        &self,
        id: CartId,
        items: &[CartItem],
        totals: &PriceBreakdown,
    ) -> Result<(), RepositoryError> {
        self.check_fail()?;
        let mut carts = self.inner.carts.lock().expect("lock");
        let Some(cart) = carts.iter_mut().find(|c| c.id == id) else {
            return Err(RepositoryError::NotFound);
        };
        cart.items = items.to_vec();
        cart.items_price = totals.items_price;
        cart.shipping_price = totals.shipping_price;
        cart.tax_price = totals.tax_price;
        cart.total_price = totals.total_price;
        Ok(())
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.check_fail()?;
        let products = self.inner.products.lock().expect("lock");
        Ok(products.iter().find(|p| p.id == id).cloned())
    }
}

/// [`ViewCache`] that records every invalidated path.
#[derive(Clone, Default)]
pub struct RecordingViewCache {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RecordingViewCache {
    /// Paths invalidated so far, in call order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("lock").clone()
    }
}

impl ViewCache for RecordingViewCache {
    async fn invalidate(&self, path: &str) {
        self.paths.lock().expect("lock").push(path.to_string());
    }
}

/// Build a catalog product fixture.
#[must_use]
pub fn product(name: &str, slug: &str, price_cents: i64, stock: i32) -> Product {
    Product {
        id: ProductId::new(Uuid::new_v4()),
        name: name.to_string(),
        slug: slug.to_string(),
        price: Decimal::new(price_cents, 2),
        stock,
    }
}

/// Build the cart line a shopper would submit for a product.
#[must_use]
pub fn line_item(product: &Product) -> CartItem {
    CartItem {
        product_id: product.id,
        name: product.name.clone(),
        slug: product.slug.clone(),
        image: format!("/images/{}.jpg", product.slug),
        price: product.price,
        qty: 1,
    }
}
