//! Unified error handling for the cart crate.
//!
//! Construction-time problems are fatal to the caller; persistence problems
//! surface here only when explicitly awaited (the background write path logs
//! and continues instead).

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Top-level error type for cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The store was configured incorrectly.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A snapshot read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
