//! # AppError
//!
//! Centralized error handling for the Brew Journal core.
//! Only failures the caller can act on become errors: asset and
//! collection-decode problems degrade to "absent"/"empty" at the port
//! implementations and never appear here.

use thiserror::Error;

/// The primary error type for all bj-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, BrewingKit)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty post content, empty kit name)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Collection write failed (disk full, permissions). The in-memory
    /// mutation is kept; the caller may re-invoke to retry the save.
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Collection could not be encoded for persistence.
    #[error("encoding failure: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A specialized Result type for Brew Journal logic.
pub type Result<T> = std::result::Result<T, AppError>;
