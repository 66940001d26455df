//! Seed the catalog with demo products.
//!
//! Local development needs products to add to carts; this command inserts a
//! small fixed catalog, skipping slugs that already exist so reruns are
//! harmless.

use rust_decimal::Decimal;
use tracing::info;

use mercata_cart::config::CartConfig;
use mercata_cart::db::{self, products::ProductRepository};

/// Demo catalog: name, slug, price in cents, stock.
const DEMO_PRODUCTS: &[(&str, &str, i64, i32)] = &[
    ("Enamel Mug", "enamel-mug", 1650, 24),
    ("Canvas Tote", "canvas-tote", 2499, 40),
    ("Linen Apron", "linen-apron", 3250, 12),
    ("Walnut Cutting Board", "walnut-cutting-board", 6800, 8),
    ("Stoneware Pitcher", "stoneware-pitcher", 5400, 0),
];

/// Insert the demo catalog.
///
/// # Errors
///
/// Returns an error if environment variables are missing or database
/// operations fail.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    info!("Connected to database");

    let products = ProductRepository::new(&pool);
    let mut inserted = 0;
    let mut skipped = 0;

    for &(name, slug, price_cents, stock) in DEMO_PRODUCTS {
        if products.get_by_slug(slug).await?.is_some() {
            skipped += 1;
            continue;
        }
        products
            .create(name, slug, Decimal::new(price_cents, 2), stock)
            .await?;
        inserted += 1;
    }

    info!("Seeding complete!");
    info!("  Products inserted: {inserted}");
    info!("  Products skipped (already exist): {skipped}");

    Ok(())
}
