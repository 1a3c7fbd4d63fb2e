//! Price service trait definition.

use async_trait::async_trait;
use eco_core::{CourseRecord, EcoResult, Interface, PriceRecord};
use serde::Serialize;

/// Outcome of one [`PriceService::refresh_prices`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriceRefreshReport {
    /// Candidates served from a fresh cached price.
    pub cache_hits: usize,
    /// Distinct SKUs fetched from upstream, in first-seen order.
    pub refreshed_skus: Vec<String>,
    /// Candidates of a shape without price support.
    pub skipped: usize,
}

impl PriceRefreshReport {
    /// Returns true if the refresh needed no upstream call.
    #[must_use]
    pub fn fully_cached(&self) -> bool {
        self.refreshed_skus.is_empty()
    }
}

/// Price service trait.
#[async_trait]
pub trait PriceService: Interface + Send + Sync {
    /// Brings every candidate's prices up to date.
    ///
    /// Fresh cached prices are applied directly. Missing or stale SKUs are
    /// fetched in one upstream call, cached, and applied.
    async fn refresh_prices(&self, candidates: &mut [CourseRecord]) -> EcoResult<PriceRefreshReport>;

    /// Caches the candidates' current prices without any freshness check.
    ///
    /// Returns the number of records stored.
    async fn cache_course_prices(&self, candidates: &[CourseRecord]) -> usize;

    /// Fetches `skus` from upstream and caches the result.
    async fn update_expired_prices(&self, skus: &[String]) -> EcoResult<Vec<PriceRecord>>;
}
