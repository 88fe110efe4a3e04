//! Unified error types and the crate-wide `Result` alias.
//!
//! Persistence read failures are generally recovered at the call site by
//! falling back to a default value, so most `Error` values a caller sees
//! come from validation or from a write that did not reach storage.

use thiserror::Error;

/// Unified error type for all core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Caller-supplied input was rejected before any state mutation
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description suitable for user-facing messaging
        message: String,
    },

    /// The underlying storage operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored document could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
