//! Domain value objects.

mod collection_kind;
mod identity;

pub use collection_kind::*;
pub use identity::*;
