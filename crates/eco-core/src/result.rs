//! Result type aliases for the Eco middleware.

use crate::EcoError;

/// A specialized `Result` type for Eco operations.
pub type EcoResult<T> = Result<T, EcoError>;
