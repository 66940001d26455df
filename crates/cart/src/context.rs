//! Request context and cart identity resolution.
//!
//! The transport layer owns session issuance and authentication; this module
//! only decides which stored cart a request refers to. Session and identity
//! state is threaded in explicitly - nothing here reads ambient request
//! context.

use mercata_core::UserId;

use crate::service::CartError;

/// Per-request shopper state, built by the caller.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Anonymous session token, stable for the lifetime of the browsing
    /// session. Established by the transport layer before any cart call.
    pub session_cart_id: Option<String>,
    /// Authenticated user, if the shopper is signed in.
    pub user_id: Option<UserId>,
}

impl RequestContext {
    /// Context for an anonymous shopper.
    #[must_use]
    pub fn anonymous(session_cart_id: impl Into<String>) -> Self {
        Self {
            session_cart_id: Some(session_cart_id.into()),
            user_id: None,
        }
    }

    /// Context for a signed-in shopper.
    #[must_use]
    pub fn authenticated(session_cart_id: impl Into<String>, user_id: UserId) -> Self {
        Self {
            session_cart_id: Some(session_cart_id.into()),
            user_id: Some(user_id),
        }
    }

    /// The session token, required for every cart operation.
    ///
    /// # Errors
    ///
    /// Returns `CartError::SessionNotFound` if the transport layer never
    /// established a session.
    pub fn session_cart_id(&self) -> Result<&str, CartError> {
        self.session_cart_id
            .as_deref()
            .ok_or(CartError::SessionNotFound)
    }
}

/// The lookup key for a stored cart.
///
/// A cart is looked up by exactly one key per request: the authenticated
/// owner when one is present, otherwise the anonymous session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIdentity {
    /// Resolve by authenticated owner.
    User(UserId),
    /// Resolve by anonymous session token.
    Session(String),
}

impl CartIdentity {
    /// Select the lookup key for a request.
    ///
    /// # Errors
    ///
    /// Returns `CartError::SessionNotFound` if no session token is present -
    /// even signed-in shoppers carry one.
    pub fn resolve(ctx: &RequestContext) -> Result<Self, CartError> {
        let session_cart_id = ctx.session_cart_id()?;
        Ok(ctx.user_id.map_or_else(
            || Self::Session(session_cart_id.to_string()),
            Self::User,
        ))
    }
}
