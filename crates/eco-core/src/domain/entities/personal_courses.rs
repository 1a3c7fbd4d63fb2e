//! Per-customer course collections.

use crate::CollectionKind;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cached SKU list for one (customer, collection) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalCourseItems {
    /// Course SKUs in upstream order.
    pub identifiers: Vec<String>,

    /// When the list was fetched from upstream.
    pub cached_at: DateTime<Utc>,
}

impl PersonalCourseItems {
    /// Creates a cached list stamped at `cached_at`.
    #[must_use]
    pub fn new(identifiers: Vec<String>, cached_at: DateTime<Utc>) -> Self {
        Self {
            identifiers,
            cached_at,
        }
    }

    /// Returns true while `now` has not passed `cached_at + ttl`.
    ///
    /// A deadline beyond the representable range never passes.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.cached_at
            .checked_add_signed(ttl)
            .map_or(true, |deadline| now <= deadline)
    }
}

/// Cart, wishlist, and owned SKUs of one caller, assembled per request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonalCourses {
    /// SKUs in the cart.
    pub cart_items: Vec<String>,
    /// SKUs in the wishlist.
    pub wishlist_items: Vec<String>,
    /// SKUs the customer already owns.
    pub owned_items: Vec<String>,
}

impl PersonalCourses {
    /// Returns the collection for `kind`.
    #[must_use]
    pub fn items(&self, kind: CollectionKind) -> &[String] {
        match kind {
            CollectionKind::Cart => &self.cart_items,
            CollectionKind::Wishlist => &self.wishlist_items,
            CollectionKind::Owned => &self.owned_items,
        }
    }

    /// Replaces the collection for `kind`.
    pub fn set_items(&mut self, kind: CollectionKind, items: Vec<String>) {
        match kind {
            CollectionKind::Cart => self.cart_items = items,
            CollectionKind::Wishlist => self.wishlist_items = items,
            CollectionKind::Owned => self.owned_items = items,
        }
    }

    /// Returns true if all three collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart_items.is_empty() && self.wishlist_items.is_empty() && self.owned_items.is_empty()
    }
}
