//! Dependency injection using Shaku.
//!
//! The cache backend is a Shaku component picked from configuration:
//! - `MemoryCacheModule`: process-local map, no external dependencies
//! - `RedisCacheModule`: shared Redis through a deadpool connection pool
//!
//! The services on top are assembled by [`ServiceContainer`].

use crate::cache::{
    CacheInterface, InMemoryCacheService, RedisCacheService, RedisCacheServiceParameters,
};
use crate::personal_course_service::PersonalCourseService;
use crate::price::PriceCacheStore;
use crate::price_service::PriceService;
use crate::r#impl::{PersonalCourseServiceImpl, PriceServiceImpl};
use eco_config::{AppConfig, CacheBackend, ConfigValidator, RedisConfig};
use eco_core::{Clock, EcoError, EcoResult};
use eco_repository::UpstreamGateway;
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// Single-process deployment: cache lives in memory.
module! {
    pub MemoryCacheModule {
        components = [InMemoryCacheService],
        providers = [],
    }
}

// Multi-instance deployment: cache shared through Redis.
module! {
    pub RedisCacheModule {
        components = [RedisCacheService],
        providers = [],
    }
}

/// Creates the Redis connection pool described by `config`.
pub fn create_redis_pool(config: &RedisConfig) -> EcoResult<deadpool_redis::Pool> {
    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size as usize));
    redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| EcoError::Configuration(format!("Failed to create Redis pool: {}", e)))
}

/// Resolves the cache backend selected in `config`.
pub fn build_cache(config: &AppConfig) -> EcoResult<Arc<dyn CacheInterface>> {
    match config.cache.backend {
        CacheBackend::Memory => {
            info!("Using in-memory cache backend");
            let module = MemoryCacheModule::builder().build();
            let cache: Arc<dyn CacheInterface> = module.resolve();
            Ok(cache)
        }
        CacheBackend::Redis => {
            info!("Using Redis cache backend (pool size {})", config.redis.pool_size);
            let pool = create_redis_pool(&config.redis)?;
            let module = RedisCacheModule::builder()
                .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
                    pool: Some(Arc::new(pool)),
                })
                .build();
            let cache: Arc<dyn CacheInterface> = module.resolve();
            Ok(cache)
        }
    }
}

/// Service graph shared by the request handlers.
#[derive(Clone)]
pub struct ServiceContainer {
    /// Cache backend every service writes through.
    pub cache: Arc<dyn CacheInterface>,
    /// Shared price block.
    pub price_store: Arc<PriceCacheStore>,
    /// Course price freshness.
    pub price_service: Arc<dyn PriceService>,
    /// Cart, wishlist, and owned collections.
    pub personal_course_service: Arc<dyn PersonalCourseService>,
}

impl ServiceContainer {
    /// Builds the services on the cache backend selected in `config`.
    pub fn build(
        config: &AppConfig,
        gateway: Arc<dyn UpstreamGateway>,
        clock: Arc<dyn Clock>,
    ) -> EcoResult<Self> {
        let cache = build_cache(config)?;
        Self::with_cache(config, cache, gateway, clock)
    }

    /// Builds the services on an existing cache backend.
    ///
    /// Fails with a configuration error when `config` does not validate.
    pub fn with_cache(
        config: &AppConfig,
        cache: Arc<dyn CacheInterface>,
        gateway: Arc<dyn UpstreamGateway>,
        clock: Arc<dyn Clock>,
    ) -> EcoResult<Self> {
        ConfigValidator::ensure_valid(config)?;
        let ttl = &config.cache;
        let price_ttl = logical_ttl("cache.price_ttl_secs", ttl.price_ttl())?;
        let personal_ttl = logical_ttl("cache.personal_ttl_secs", ttl.personal_ttl())?;

        let price_store = Arc::new(PriceCacheStore::new(
            cache.clone(),
            clock.clone(),
            ttl.store_ttl(),
        ));

        let price_service: Arc<dyn PriceService> = Arc::new(PriceServiceImpl::new(
            gateway.clone(),
            price_store.clone(),
            clock.clone(),
            price_ttl,
        ));

        let personal_course_service: Arc<dyn PersonalCourseService> =
            Arc::new(PersonalCourseServiceImpl::new(
                gateway,
                cache.clone(),
                clock,
                personal_ttl,
                ttl.store_ttl(),
            ));

        info!(
            "Service container ready (price TTL {}s, personal TTL {}s)",
            ttl.price_ttl_secs, ttl.personal_ttl_secs
        );

        Ok(Self {
            cache,
            price_store,
            price_service,
            personal_course_service,
        })
    }
}

fn logical_ttl(name: &str, ttl: std::time::Duration) -> EcoResult<chrono::Duration> {
    chrono::Duration::from_std(ttl)
        .map_err(|e| EcoError::Configuration(format!("TTL '{}' out of range: {}", name, e)))
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("cache_enabled", &self.cache.is_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::{CartId, CustomerId, PriceRecord, SystemClock};
    use eco_repository::UpstreamResponse;

    struct OfflineGateway;

    #[async_trait::async_trait]
    impl UpstreamGateway for OfflineGateway {
        async fn fetch_prices(&self, _skus: &[String]) -> UpstreamResponse<Vec<PriceRecord>> {
            UpstreamResponse::empty()
        }

        async fn fetch_cart_items(&self, _customer_id: CustomerId) -> UpstreamResponse<Vec<String>> {
            UpstreamResponse::empty()
        }

        async fn fetch_wishlist_items(&self, _customer_id: CustomerId) -> UpstreamResponse<Vec<String>> {
            UpstreamResponse::empty()
        }

        async fn fetch_owned_items(&self, _token: &str) -> UpstreamResponse<Vec<String>> {
            UpstreamResponse::empty()
        }

        async fn fetch_guest_cart(&self, _cart_id: &CartId) -> UpstreamResponse<Vec<String>> {
            UpstreamResponse::empty()
        }
    }

    #[tokio::test]
    async fn test_memory_backend_resolves() {
        let cache = build_cache(&AppConfig::default()).unwrap();
        assert!(cache.is_enabled());

        cache
            .set_raw("k", "1", std::time::Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_oversized_ttl_is_a_configuration_error() {
        let mut config = AppConfig::default();
        config.cache.store_ttl_secs = u64::MAX;

        let err = ServiceContainer::build(&config, Arc::new(OfflineGateway), Arc::new(SystemClock))
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("cache.store_ttl_secs"));
    }

    #[tokio::test]
    async fn test_redis_pool_is_lazy() {
        // Pool creation never connects, so an unreachable host still builds.
        let mut config = AppConfig::default();
        config.cache.backend = CacheBackend::Redis;
        config.redis.url = "redis://127.0.0.1:1".to_string();

        let cache = build_cache(&config).unwrap();
        assert!(cache.is_enabled());
    }

    #[test]
    fn test_malformed_redis_url_is_a_configuration_error() {
        let config = RedisConfig {
            url: "not a url".to_string(),
            pool_size: 4,
        };
        let err = create_redis_pool(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
