//! Upstream gateway trait.

use crate::UpstreamResponse;
use async_trait::async_trait;
use eco_core::{CartId, CustomerId, Interface, PriceRecord};

/// Upstream e-commerce backend as seen by the cache services.
///
/// Implementations own transport concerns (timeouts, auth headers, retries).
/// Every method reports failure through the response status.
#[async_trait]
pub trait UpstreamGateway: Interface + Send + Sync {
    /// Fetches current prices for the given SKUs.
    ///
    /// The returned records' `cached_at` is ignored; the cache stamps its own.
    async fn fetch_prices(&self, skus: &[String]) -> UpstreamResponse<Vec<PriceRecord>>;

    /// Fetches the SKUs in a customer's cart.
    async fn fetch_cart_items(&self, customer_id: CustomerId) -> UpstreamResponse<Vec<String>>;

    /// Fetches the SKUs on a customer's wishlist.
    async fn fetch_wishlist_items(&self, customer_id: CustomerId) -> UpstreamResponse<Vec<String>>;

    /// Fetches the SKUs a customer owns. The endpoint is keyed by token.
    async fn fetch_owned_items(&self, token: &str) -> UpstreamResponse<Vec<String>>;

    /// Fetches the SKUs in a guest cart.
    async fn fetch_guest_cart(&self, cart_id: &CartId) -> UpstreamResponse<Vec<String>>;
}
