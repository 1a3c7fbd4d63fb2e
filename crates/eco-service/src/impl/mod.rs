//! Service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `price_service.rs`).

pub mod personal_course_service_impl;
pub mod price_service_impl;

pub use personal_course_service_impl::PersonalCourseServiceImpl;
pub use price_service_impl::PriceServiceImpl;
