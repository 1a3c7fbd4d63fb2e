//! Price service implementation.

use crate::price::{ConversionRegistry, PriceCacheStore};
use crate::price_service::{PriceRefreshReport, PriceService};
use async_trait::async_trait;
use chrono::Duration;
use eco_core::{Clock, CourseRecord, EcoResult, PriceRecord};
use eco_repository::UpstreamGateway;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upstream name used in errors raised by price fetches.
const PRICE_SERVICE: &str = "upstream:prices";

/// Cache-aside price service backed by the shared price block.
pub struct PriceServiceImpl {
    gateway: Arc<dyn UpstreamGateway>,
    store: Arc<PriceCacheStore>,
    clock: Arc<dyn Clock>,
    registry: ConversionRegistry,
    price_ttl: Duration,
}

impl PriceServiceImpl {
    /// Creates a new price service. Cached prices older than `price_ttl`
    /// are refetched.
    pub fn new(
        gateway: Arc<dyn UpstreamGateway>,
        store: Arc<PriceCacheStore>,
        clock: Arc<dyn Clock>,
        price_ttl: Duration,
    ) -> Self {
        Self {
            gateway,
            store,
            clock,
            registry: ConversionRegistry::new(),
            price_ttl,
        }
    }
}

#[async_trait]
impl PriceService for PriceServiceImpl {
    async fn refresh_prices(&self, candidates: &mut [CourseRecord]) -> EcoResult<PriceRefreshReport> {
        let now = self.clock.now();
        let block = self.store.get_all().await.unwrap_or_default();
        let mut report = PriceRefreshReport::default();
        let mut pending: HashSet<String> = HashSet::new();

        for candidate in candidates.iter_mut() {
            let Some(converter) = self.registry.resolve(candidate) else {
                report.skipped += 1;
                continue;
            };
            let sku = converter.sku().trim().to_string();
            if sku.is_empty() {
                report.skipped += 1;
                continue;
            }

            match block.get(&sku) {
                Some(record) if record.is_fresh(now, self.price_ttl) => {
                    converter.apply_price(record);
                    report.cache_hits += 1;
                }
                _ => {
                    if pending.insert(sku.clone()) {
                        report.refreshed_skus.push(sku);
                    }
                }
            }
        }

        debug!(
            "Price refresh: {} hits, {} to fetch, {} skipped",
            report.cache_hits,
            report.refreshed_skus.len(),
            report.skipped
        );

        if report.fully_cached() {
            return Ok(report);
        }

        let fetched = self.update_expired_prices(&report.refreshed_skus).await?;
        let fetched: HashMap<&str, &PriceRecord> = fetched
            .iter()
            .filter(|record| pending.contains(&record.sku))
            .map(|record| (record.sku.as_str(), record))
            .collect();

        for candidate in candidates.iter_mut() {
            if let Some(converter) = self.registry.resolve(candidate) {
                if let Some(record) = fetched.get(converter.sku().trim()) {
                    converter.apply_price(record);
                }
            }
        }

        Ok(report)
    }

    async fn cache_course_prices(&self, candidates: &[CourseRecord]) -> usize {
        let now = self.clock.now();
        let records: Vec<PriceRecord> = candidates
            .iter()
            .filter_map(|candidate| self.registry.resolve_ref(candidate))
            .filter_map(|converter| converter.to_price_record(now))
            .collect();

        let stored = self.store.put_batch(records).await;
        debug!("Cached prices of {} courses", stored.len());
        stored.len()
    }

    async fn update_expired_prices(&self, skus: &[String]) -> EcoResult<Vec<PriceRecord>> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }

        info!("Fetching {} prices from upstream", skus.len());
        let response = self.gateway.fetch_prices(skus).await;

        match response.into_result(PRICE_SERVICE)? {
            Some(records) => Ok(self.store.put_batch(records).await),
            None => {
                warn!("Upstream returned no price payload for {} SKUs", skus.len());
                Ok(Vec::new())
            }
        }
    }
}

impl std::fmt::Debug for PriceServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceServiceImpl")
            .field("price_ttl", &self.price_ttl)
            .finish_non_exhaustive()
    }
}
