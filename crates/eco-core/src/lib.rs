//! # Eco Core
//!
//! Core types, domain models, and error definitions for the Eco middleware.
//! Every other crate in the workspace builds on the abstractions defined here.

pub mod clock;
pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;

pub use clock::*;
pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use telemetry::{init_tracing, TelemetryConfig};

// Re-export shaku for dependency injection
pub use shaku::Interface;
