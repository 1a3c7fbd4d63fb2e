//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with in-memory and Redis
//! implementations, plus the key layout shared by all cache namespaces.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_keys::CacheNamespace;
pub use memory_cache::{InMemoryCacheService, InMemoryCacheServiceParameters};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
