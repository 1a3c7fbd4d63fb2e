//! Personal collection kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three per-customer course collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Courses in the shopping cart.
    Cart,
    /// Courses on the wishlist.
    Wishlist,
    /// Courses already purchased.
    Owned,
}

impl CollectionKind {
    /// All kinds in the order the aggregate is assembled.
    pub const ALL: [Self; 3] = [Self::Cart, Self::Wishlist, Self::Owned];

    /// Returns the lowercase name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::Owned => "owned",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
