//! Rendered-page cache and the view-invalidation hook.
//!
//! Cart mutations change what the product and cart pages should show, so the
//! mutation service signals the rendering layer that its cached views are
//! stale. The hook is a trait: production callers hand in their page cache,
//! tests hand in a recorder, and callers without a render cache use the
//! no-op.

use moka::future::Cache;

/// Notification that cached renderings of a path are stale.
#[allow(async_fn_in_trait)]
pub trait ViewCache {
    /// Drop any cached rendering of `path`.
    async fn invalidate(&self, path: &str);
}

/// Cached rendered fragments keyed by request path.
///
/// Backs the storefront's product and cart pages; the cart service only ever
/// invalidates, the rendering layer populates.
#[derive(Clone)]
pub struct PageCache {
    pages: Cache<String, String>,
}

impl PageCache {
    /// Create a page cache holding at most `capacity` rendered fragments.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            pages: Cache::new(capacity),
        }
    }

    /// Store a rendered fragment for a path.
    pub async fn insert(&self, path: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(path.into(), html.into()).await;
    }

    /// Fetch the cached fragment for a path, if still fresh.
    pub async fn get(&self, path: &str) -> Option<String> {
        self.pages.get(path).await
    }
}

impl ViewCache for PageCache {
    async fn invalidate(&self, path: &str) {
        self.pages.invalidate(path).await;
    }
}

/// View-invalidation hook for callers without a render cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewCache;

impl ViewCache for NoopViewCache {
    async fn invalidate(&self, _path: &str) {}
}
