//! Cached course price.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Price snapshot of a single course, keyed by SKU inside the price block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Course SKU.
    pub sku: String,

    /// List price before discounts.
    pub original_price: f64,

    /// Price the customer actually pays.
    pub discount_price: f64,

    /// When the record entered the cache.
    pub cached_at: DateTime<Utc>,
}

impl PriceRecord {
    /// Creates a new price record.
    #[must_use]
    pub fn new(
        sku: impl Into<String>,
        original_price: f64,
        discount_price: f64,
        cached_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sku: sku.into(),
            original_price,
            discount_price,
            cached_at,
        }
    }

    /// Returns true when the record was cached strictly after `now - ttl`.
    ///
    /// A cutoff before the representable range means the record never expires.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.checked_sub_signed(ttl)
            .map_or(true, |cutoff| self.cached_at > cutoff)
    }

    /// Returns true if the SKU is usable as a cache key.
    #[must_use]
    pub fn has_sku(&self) -> bool {
        !self.sku.trim().is_empty()
    }
}
