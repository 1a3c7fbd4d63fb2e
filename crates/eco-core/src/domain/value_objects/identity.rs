//! Caller identity for personal data lookups.

use crate::{CartId, CustomerId};

/// Authenticated customer: the decoded id plus the raw token some upstream
/// endpoints still require.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSession {
    /// Customer id decoded from the token.
    pub customer_id: CustomerId,
    /// Upstream bearer token.
    pub token: String,
}

impl CustomerSession {
    /// Creates a session.
    #[must_use]
    pub fn new(customer_id: CustomerId, token: impl Into<String>) -> Self {
        Self {
            customer_id,
            token: token.into(),
        }
    }
}

/// Who is asking for personal course data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalIdentity {
    /// Logged-in customer; all three collections are served.
    Customer(CustomerSession),
    /// Guest with an anonymous cart; only the cart is served.
    Guest(CartId),
    /// Nobody; the aggregate is empty.
    Anonymous,
}

impl PersonalIdentity {
    /// Picks the identity from what the request carried.
    ///
    /// A customer session wins over a cart id; a blank cart id counts as absent.
    #[must_use]
    pub fn resolve(session: Option<CustomerSession>, cart_id: Option<&str>) -> Self {
        if let Some(session) = session {
            return Self::Customer(session);
        }
        match cart_id.and_then(CartId::parse) {
            Some(cart_id) => Self::Guest(cart_id),
            None => Self::Anonymous,
        }
    }
}
