//! Common test infrastructure for the cache-aside integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eco_config::AppConfig;
use eco_core::{init_tracing, CartId, Clock, CustomerId, ManualClock, PriceRecord};
use eco_repository::{UpstreamGateway, UpstreamResponse};
use eco_service::ServiceContainer;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One call observed by [`FakeUpstream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamCall {
    Prices(Vec<String>),
    Cart(CustomerId),
    Wishlist(CustomerId),
    Owned(String),
    GuestCart(String),
}

/// In-memory upstream that serves canned data and records every call.
#[derive(Default)]
pub struct FakeUpstream {
    prices: Mutex<HashMap<String, (f64, f64)>>,
    carts: Mutex<HashMap<CustomerId, Vec<String>>>,
    wishlists: Mutex<HashMap<CustomerId, Vec<String>>>,
    owned: Mutex<HashMap<String, Vec<String>>>,
    guest_carts: Mutex<HashMap<String, Vec<String>>>,
    failing: Mutex<bool>,
    calls: Mutex<Vec<UpstreamCall>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&self, sku: &str, original: f64, discount: f64) {
        self.prices
            .lock()
            .unwrap()
            .insert(sku.to_string(), (original, discount));
    }

    pub fn set_cart(&self, customer_id: CustomerId, items: &[&str]) {
        self.carts.lock().unwrap().insert(customer_id, to_skus(items));
    }

    pub fn set_wishlist(&self, customer_id: CustomerId, items: &[&str]) {
        self.wishlists
            .lock()
            .unwrap()
            .insert(customer_id, to_skus(items));
    }

    pub fn set_owned(&self, token: &str, items: &[&str]) {
        self.owned
            .lock()
            .unwrap()
            .insert(token.to_string(), to_skus(items));
    }

    pub fn set_guest_cart(&self, cart_id: &str, items: &[&str]) {
        self.guest_carts
            .lock()
            .unwrap()
            .insert(cart_id.to_string(), to_skus(items));
    }

    /// Makes every subsequent call fail with a 503.
    pub fn fail_all(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn price_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UpstreamCall::Prices(skus) => Some(skus),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: UpstreamCall) -> bool {
        self.calls.lock().unwrap().push(call);
        *self.failing.lock().unwrap()
    }

    fn list<K: std::hash::Hash + Eq>(
        &self,
        call: UpstreamCall,
        source: &Mutex<HashMap<K, Vec<String>>>,
        key: &K,
    ) -> UpstreamResponse<Vec<String>> {
        if self.record(call) {
            return UpstreamResponse::failure(503, "upstream unavailable");
        }
        UpstreamResponse::ok(source.lock().unwrap().get(key).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl UpstreamGateway for FakeUpstream {
    async fn fetch_prices(&self, skus: &[String]) -> UpstreamResponse<Vec<PriceRecord>> {
        if self.record(UpstreamCall::Prices(skus.to_vec())) {
            return UpstreamResponse::failure(503, "upstream unavailable");
        }
        let prices = self.prices.lock().unwrap();
        let records = skus
            .iter()
            .filter_map(|sku| {
                prices.get(sku).map(|(original, discount)| {
                    PriceRecord::new(sku.clone(), *original, *discount, DateTime::<Utc>::UNIX_EPOCH)
                })
            })
            .collect();
        UpstreamResponse::ok(records)
    }

    async fn fetch_cart_items(&self, customer_id: CustomerId) -> UpstreamResponse<Vec<String>> {
        self.list(UpstreamCall::Cart(customer_id), &self.carts, &customer_id)
    }

    async fn fetch_wishlist_items(&self, customer_id: CustomerId) -> UpstreamResponse<Vec<String>> {
        self.list(UpstreamCall::Wishlist(customer_id), &self.wishlists, &customer_id)
    }

    async fn fetch_owned_items(&self, token: &str) -> UpstreamResponse<Vec<String>> {
        self.list(UpstreamCall::Owned(token.to_string()), &self.owned, &token.to_string())
    }

    async fn fetch_guest_cart(&self, cart_id: &CartId) -> UpstreamResponse<Vec<String>> {
        let key = cart_id.as_str().to_string();
        self.list(UpstreamCall::GuestCart(key.clone()), &self.guest_carts, &key)
    }
}

/// Services wired on the in-memory backend with a manual clock.
pub struct TestContext {
    pub services: ServiceContainer,
    pub upstream: Arc<FakeUpstream>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        // Only the first test installs the subscriber.
        let _ = init_tracing(&config.observability.telemetry());

        let upstream = Arc::new(FakeUpstream::new());
        let clock = Arc::new(ManualClock::default());
        let services = ServiceContainer::build(&config, upstream.clone(), clock.clone())
            .expect("Failed to build service container");
        Self {
            services,
            upstream,
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

pub fn to_skus(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
