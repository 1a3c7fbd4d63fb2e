//! Cache key generators for consistent key naming.
//!
//! Every key is `eco:cache:<namespace>:<key>`, so two namespaces can never
//! collide even when their raw keys are equal.

use eco_core::{CollectionKind, CustomerId};
use std::fmt::{self, Display};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "eco:cache";

/// Key of the single entry holding the whole price map.
pub const PRICE_MAP_KEY: &str = "all_price";

/// Logically distinct cache partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// SKU to price map, stored as one entry.
    PriceCacheBlock,
    /// Cart SKUs per customer.
    CoursesInCart,
    /// Wishlist SKUs per customer.
    CoursesInWishlist,
    /// Owned SKUs per customer.
    CoursesOwned,
}

impl CacheNamespace {
    /// Returns the namespace segment used in keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriceCacheBlock => "price_cache_block",
            Self::CoursesInCart => "courses_in_cart",
            Self::CoursesInWishlist => "courses_in_wishlist",
            Self::CoursesOwned => "courses_owned",
        }
    }

    /// Returns the namespace backing a personal collection.
    #[must_use]
    pub const fn for_collection(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Cart => Self::CoursesInCart,
            CollectionKind::Wishlist => Self::CoursesInWishlist,
            CollectionKind::Owned => Self::CoursesOwned,
        }
    }

    /// Renders the full cache key for `key` inside this namespace.
    #[must_use]
    pub fn key(&self, key: impl Display) -> String {
        format!("{}:{}:{}", CACHE_PREFIX, self.as_str(), key)
    }
}

impl Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate the cache key of the price map.
#[must_use]
pub fn price_block() -> String {
    CacheNamespace::PriceCacheBlock.key(PRICE_MAP_KEY)
}

/// Generate the cache key of one customer's collection.
#[must_use]
pub fn personal_items(kind: CollectionKind, customer_id: CustomerId) -> String {
    CacheNamespace::for_collection(kind).key(customer_id)
}
