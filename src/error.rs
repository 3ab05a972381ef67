//! Error types for the analytics crate.
//!
//! The compute core itself is total: every scoring, classification, and
//! aggregation function returns a defined value for any well-typed input.
//! Errors only arise on the configuration and logging surfaces.

use thiserror::Error;

/// Top-level error type for traincore operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration parsing or validation errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for traincore operations
pub type Result<T> = std::result::Result<T, CoreError>;
