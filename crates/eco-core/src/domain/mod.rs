//! # Eco Domain
//!
//! Upstream course shapes, cached price records, and per-customer course
//! collections handled by the cache-aside services.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
