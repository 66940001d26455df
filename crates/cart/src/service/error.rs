//! Cart service error types and the boundary result value.

use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::validate::ValidationError;

/// Errors that can occur during cart operations.
///
/// Every variant is recoverable at the boundary: the service converts them
/// to [`CartActionResult`] values, nothing propagates to the caller as a
/// fault.
#[derive(Debug, Error)]
pub enum CartError {
    /// No anonymous session token on the request; the transport layer must
    /// establish one before any cart call.
    #[error("Cart session not found")]
    SessionNotFound,

    /// Referenced product does not exist in the catalog.
    #[error("Product not found")]
    ProductNotFound,

    /// No cart exists for the resolved identity.
    #[error("Cart not found")]
    CartNotFound,

    /// The cart has no line for the referenced product.
    #[error("Item not found")]
    ItemNotFound,

    /// Requested quantity exceeds purchasable stock.
    #[error("Product out of stock")]
    OutOfStock,

    /// Malformed incoming item.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a cart mutation, as seen by the page layer.
///
/// Mutations never raise across the boundary; failures arrive here with a
/// shopper-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct CartActionResult {
    /// Whether the mutation was applied.
    pub success: bool,
    /// Shopper-readable outcome description.
    pub message: String,
}

impl CartActionResult {
    /// A successful outcome.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Convert a failure into a boundary value.
    ///
    /// Persistence faults surface a generic message - connection strings and
    /// constraint names never reach shoppers.
    #[must_use]
    pub fn from_error(error: &CartError) -> Self {
        let message = match error {
            CartError::Repository(_) => "Something went wrong. Please try again.".to_string(),
            other => other.to_string(),
        };
        Self {
            success: false,
            message,
        }
    }
}
