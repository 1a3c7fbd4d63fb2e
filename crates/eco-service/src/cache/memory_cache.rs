//! Process-local cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use eco_core::EcoResult;
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// In-memory cache service.
///
/// Entries are evicted lazily once their backend TTL has passed. Safe for
/// concurrent readers and writers; no cross-process coherence.
#[derive(Component, Default)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCacheService {
    /// Raw JSON values with their eviction deadline. `None` never expires.
    #[shaku(default)]
    entries: RwLock<HashMap<String, (String, Option<Instant>)>>,
}

fn is_live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.map_or(true, |deadline| deadline > now)
}

impl InMemoryCacheService {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .values()
            .filter(|(_, expires_at)| is_live(*expires_at, now))
            .count()
    }

    /// Returns true if no live entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> EcoResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some((value, expires_at)) if is_live(*expires_at, now) => {
                    debug!("Cache hit for key '{}'", key);
                    return Ok(Some(value.clone()));
                }
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return Ok(None);
                }
                Some(_) => {}
            }
        }

        // Expired: drop it unless a writer replaced it in the meantime.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|(_, expires_at)| !is_live(*expires_at, now)) {
            entries.remove(key);
            debug!("Evicted expired key '{}'", key);
        }
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> EcoResult<()> {
        // Deadlines past the platform's Instant range never expire.
        let expires_at = Instant::now().checked_add(ttl);
        self.entries
            .write()
            .insert(key.to_string(), (value.to_string(), expires_at));

        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}
