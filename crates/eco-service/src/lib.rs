//! # Eco Service
//!
//! Cache-aside services shielding the upstream e-commerce backend:
//! course prices with a bounded staleness window, and per-customer
//! cart/wishlist/owned collections.

pub mod cache;
pub mod di;
pub mod r#impl;
pub mod personal_course_service;
pub mod price;
pub mod price_service;

pub use cache::*;
pub use di::*;
pub use personal_course_service::*;
pub use price::*;
pub use price_service::*;
pub use r#impl::{PersonalCourseServiceImpl, PriceServiceImpl};
