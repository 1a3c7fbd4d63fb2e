//! The price block: every cached price in one cache entry.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use eco_core::{Clock, PriceRecord};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Map of SKU to price record stored under a single key.
///
/// Writers in one process are serialised so a batch never overwrites
/// another batch's records. Processes sharing a Redis backend still race;
/// the last write of the whole block wins there.
pub struct PriceCacheStore {
    cache: Arc<dyn CacheInterface>,
    clock: Arc<dyn Clock>,
    store_ttl: Duration,
    write_lock: Mutex<()>,
}

impl PriceCacheStore {
    /// Creates a store on top of `cache`. `store_ttl` is the backend
    /// eviction deadline of the whole block.
    pub fn new(cache: Arc<dyn CacheInterface>, clock: Arc<dyn Clock>, store_ttl: Duration) -> Self {
        Self {
            cache,
            clock,
            store_ttl,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the whole block.
    ///
    /// Returns `None` when the block is absent or unreadable; read failures
    /// are logged and never propagated.
    pub async fn get_all(&self) -> Option<HashMap<String, PriceRecord>> {
        let key = cache_keys::price_block();
        match self.cache.get::<HashMap<String, PriceRecord>>(&key).await {
            Ok(block) => block,
            Err(e) => {
                warn!("Failed to read price block, treating as miss: {}", e);
                None
            }
        }
    }

    /// Looks up a single SKU.
    pub async fn get(&self, sku: &str) -> Option<PriceRecord> {
        self.get_all().await.and_then(|mut block| block.remove(sku))
    }

    /// Upserts `records` into the block, stamping each with the current time.
    ///
    /// Records without a SKU are dropped. Returns the records as stored.
    pub async fn put_batch(&self, records: Vec<PriceRecord>) -> Vec<PriceRecord> {
        let mut records: Vec<PriceRecord> = records.into_iter().filter(PriceRecord::has_sku).collect();
        if records.is_empty() {
            return records;
        }

        let _guard = self.write_lock.lock().await;

        let now = self.clock.now();
        let mut block = self.get_all().await.unwrap_or_default();
        for record in &mut records {
            record.cached_at = now;
            block.insert(record.sku.clone(), record.clone());
        }

        let key = cache_keys::price_block();
        match self.cache.set(&key, &block, self.store_ttl).await {
            Ok(()) => info!(
                "Cached {} price records ({} in block)",
                records.len(),
                block.len()
            ),
            Err(e) => warn!("Failed to write price block: {}", e),
        }

        debug!("Price block write finished at {}", now);
        records
    }
}

impl std::fmt::Debug for PriceCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceCacheStore")
            .field("store_ttl", &self.store_ttl)
            .finish_non_exhaustive()
    }
}
