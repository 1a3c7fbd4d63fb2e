//! Personal course service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::personal_course_service::PersonalCourseService;
use async_trait::async_trait;
use chrono::Duration;
use eco_core::{
    CartId, Clock, CollectionKind, CustomerSession, EcoResult, PersonalCourseItems, PersonalCourses,
    PersonalIdentity,
};
use eco_repository::{UpstreamGateway, UpstreamResponse};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache-aside service for the cart, wishlist, and owned collections.
///
/// Each collection is cached and refreshed on its own; a stale cart never
/// forces a wishlist fetch.
pub struct PersonalCourseServiceImpl {
    gateway: Arc<dyn UpstreamGateway>,
    cache: Arc<dyn CacheInterface>,
    clock: Arc<dyn Clock>,
    personal_ttl: Duration,
    store_ttl: std::time::Duration,
}

impl PersonalCourseServiceImpl {
    /// Creates a new personal course service.
    pub fn new(
        gateway: Arc<dyn UpstreamGateway>,
        cache: Arc<dyn CacheInterface>,
        clock: Arc<dyn Clock>,
        personal_ttl: Duration,
        store_ttl: std::time::Duration,
    ) -> Self {
        Self {
            gateway,
            cache,
            clock,
            personal_ttl,
            store_ttl,
        }
    }

    async fn read_cached(&self, key: &str) -> Option<PersonalCourseItems> {
        match self.cache.get::<PersonalCourseItems>(key).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read '{}', treating as miss: {}", key, e);
                None
            }
        }
    }

    async fn fetch(&self, kind: CollectionKind, session: &CustomerSession) -> UpstreamResponse<Vec<String>> {
        match kind {
            CollectionKind::Cart => self.gateway.fetch_cart_items(session.customer_id).await,
            CollectionKind::Wishlist => self.gateway.fetch_wishlist_items(session.customer_id).await,
            CollectionKind::Owned => self.gateway.fetch_owned_items(&session.token).await,
        }
    }

    async fn refresh(&self, kind: CollectionKind, session: &CustomerSession, key: &str) -> EcoResult<Vec<String>> {
        info!("Refreshing {} of customer {}", kind, session.customer_id);

        let response = self.fetch(kind, session).await;
        let Some(identifiers) = response.into_result(&format!("upstream:{}", kind))? else {
            warn!("Upstream returned no {} payload for customer {}", kind, session.customer_id);
            return Ok(Vec::new());
        };

        let entry = PersonalCourseItems::new(identifiers, self.clock.now());
        if let Err(e) = self.cache.set(key, &entry, self.store_ttl).await {
            warn!("Failed to cache '{}': {}", key, e);
        }
        Ok(entry.identifiers)
    }

    async fn customer_courses(&self, session: &CustomerSession) -> PersonalCourses {
        let mut courses = PersonalCourses::default();

        for kind in CollectionKind::ALL {
            let items = match self.get_collection(kind, session).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(
                        "Serving cached {} of customer {} after refresh failure: {}",
                        kind, session.customer_id, e
                    );
                    let key = cache_keys::personal_items(kind, session.customer_id);
                    self.read_cached(&key)
                        .await
                        .map(|entry| entry.identifiers)
                        .unwrap_or_default()
                }
            };
            courses.set_items(kind, items);
        }

        courses
    }

    async fn guest_courses(&self, cart_id: &CartId) -> EcoResult<PersonalCourses> {
        debug!("Fetching guest cart {}", cart_id);

        let cart_items = self
            .gateway
            .fetch_guest_cart(cart_id)
            .await
            .into_result("upstream:guest_cart")?
            .unwrap_or_default();

        Ok(PersonalCourses {
            cart_items,
            ..PersonalCourses::default()
        })
    }
}

#[async_trait]
impl PersonalCourseService for PersonalCourseServiceImpl {
    async fn get_personal_courses(&self, identity: &PersonalIdentity) -> EcoResult<PersonalCourses> {
        match identity {
            PersonalIdentity::Customer(session) => Ok(self.customer_courses(session).await),
            PersonalIdentity::Guest(cart_id) => self.guest_courses(cart_id).await,
            PersonalIdentity::Anonymous => {
                debug!("No identity, returning empty personal courses");
                Ok(PersonalCourses::default())
            }
        }
    }

    async fn get_collection(&self, kind: CollectionKind, session: &CustomerSession) -> EcoResult<Vec<String>> {
        let key = cache_keys::personal_items(kind, session.customer_id);

        if let Some(entry) = self.read_cached(&key).await {
            if entry.is_fresh(self.clock.now(), self.personal_ttl) {
                debug!("Serving cached {} of customer {}", kind, session.customer_id);
                return Ok(entry.identifiers);
            }
        }

        self.refresh(kind, session, &key).await
    }
}

impl std::fmt::Debug for PersonalCourseServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonalCourseServiceImpl")
            .field("personal_ttl", &self.personal_ttl)
            .finish_non_exhaustive()
    }
}
