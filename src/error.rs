//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// A miss on `get` is not an error; it is reported as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A constructor or configuration argument is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Storing the entry would push the accounted memory over the budget
    #[error("Memory overflow: {required} bytes required, budget is {budget} bytes")]
    MemoryOverflow {
        /// Accounted total the insertion would have produced
        required: usize,
        /// Configured budget
        budget: usize,
    },

    /// The cache was built outside of a tokio runtime, so the reaper cannot run
    #[error("No tokio runtime available to host the expiration reaper")]
    RuntimeUnavailable,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
