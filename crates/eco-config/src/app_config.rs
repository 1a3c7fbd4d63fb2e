//! Application configuration structures.

use eco_core::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Cache-aside configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Redis configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "eco-middleware".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Where cached entries live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local map.
    #[default]
    Memory,
    /// Shared Redis instance.
    Redis,
}

/// Cache-aside configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend holding the cached entries.
    pub backend: CacheBackend,
    /// Maximum age of a cached course price, in seconds.
    pub price_ttl_secs: u64,
    /// Maximum age of a cached cart/wishlist/owned list, in seconds.
    pub personal_ttl_secs: u64,
    /// Eviction TTL handed to the backend for every write, in seconds.
    ///
    /// Longer than the logical TTLs so stale entries stay around as a fallback.
    pub store_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            price_ttl_secs: 300,      // 5 minutes
            personal_ttl_secs: 600,   // 10 minutes
            store_ttl_secs: 86_400,   // 1 day
        }
    }
}

impl CacheConfig {
    /// Returns the price TTL as a Duration.
    #[must_use]
    pub const fn price_ttl(&self) -> Duration {
        Duration::from_secs(self.price_ttl_secs)
    }

    /// Returns the personal collection TTL as a Duration.
    #[must_use]
    pub const fn personal_ttl(&self) -> Duration {
        Duration::from_secs(self.personal_ttl_secs)
    }

    /// Returns the backend eviction TTL as a Duration.
    #[must_use]
    pub const fn store_ttl(&self) -> Duration {
        Duration::from_secs(self.store_ttl_secs)
    }
}

/// Redis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis URL.
    pub url: String,
    /// Connection pool size.
    pub pool_size: u32,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Builds the tracing settings for this configuration.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_level: format!("{},eco={}", self.log_level, self.log_level),
            json: self.log_format.eq_ignore_ascii_case("json"),
        }
    }
}
