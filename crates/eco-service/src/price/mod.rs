//! Price conversion and the shared price block.

mod converter;
mod price_cache_store;

pub use converter::{ConversionRegistry, PriceConverter};
pub use price_cache_store::PriceCacheStore;
