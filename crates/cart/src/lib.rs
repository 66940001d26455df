//! Mercata Cart - pre-checkout cart management.
//!
//! This crate owns the shopping cart: identity resolution for anonymous and
//! authenticated shoppers, price computation, and add/remove item mutations
//! with stock and quantity invariants.
//!
//! # Architecture
//!
//! - [`service::CartService`] orchestrates mutations and is the only writer
//!   of cart rows. It is generic over the [`gateway::CartGateway`] persistence
//!   contract and the [`cache::ViewCache`] invalidation hook, so callers pick
//!   the PostgreSQL gateway in production and an in-memory one in tests.
//! - [`pricing`] is a pure function from line items to a price breakdown.
//! - [`context::RequestContext`] carries the session token and authenticated
//!   identity explicitly; nothing reads ambient request state.
//!
//! Rendering, routing, authentication issuance, checkout, and payment live
//! elsewhere - this crate stops at the persisted cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod context;
pub mod db;
pub mod gateway;
pub mod models;
pub mod pricing;
pub mod service;
pub mod validate;

pub use cache::{NoopViewCache, PageCache, ViewCache};
pub use context::{CartIdentity, RequestContext};
pub use gateway::CartGateway;
pub use models::{Cart, CartItem, NewCart, Product};
pub use pricing::PriceBreakdown;
pub use service::{CartActionResult, CartError, CartService};
