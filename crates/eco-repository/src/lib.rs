//! # Eco Repository
//!
//! Contracts for the upstream e-commerce backend:
//!
//! ```text
//! Service (price / personal course caches)
//!   ↓  Arc<dyn UpstreamGateway>   (gateway interface)
//! HTTP client for the backend     (outside this workspace)
//!   ↓
//! Magento
//! ```
//!
//! Every call answers with an [`UpstreamResponse`]: failures travel as values
//! carrying a status, never as panics.

pub mod response;
pub mod traits;

pub use response::*;
pub use traits::*;
