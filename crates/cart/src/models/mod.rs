//! Cart domain types.
//!
//! These types represent validated domain objects separate from database row
//! types.

pub mod cart;
pub mod product;

pub use cart::{Cart, CartItem, NewCart};
pub use product::Product;
