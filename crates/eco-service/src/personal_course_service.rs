//! Personal course service trait definition.

use async_trait::async_trait;
use eco_core::{CollectionKind, CustomerSession, EcoResult, Interface, PersonalCourses, PersonalIdentity};

/// Personal course service trait.
#[async_trait]
pub trait PersonalCourseService: Interface + Send + Sync {
    /// Builds the cart/wishlist/owned aggregate for `identity`.
    ///
    /// Customers are served cache-aside per collection, guests get their
    /// cart straight from upstream, anonymous callers get empty lists.
    async fn get_personal_courses(&self, identity: &PersonalIdentity) -> EcoResult<PersonalCourses>;

    /// Returns one collection of a customer, refreshing it if stale.
    async fn get_collection(&self, kind: CollectionKind, session: &CustomerSession) -> EcoResult<Vec<String>>;
}
