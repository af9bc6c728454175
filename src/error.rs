//! Error types for the workout tracker

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Workout tracker error types
#[derive(Error, Debug)]
pub enum Error {
    /// Raw form input rejected before reaching the store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Caller broke the store's input contract (e.g. cadence given for a cycling workout)
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// No workout with the given id
    #[error("Workout not found: {0}")]
    NotFound(String),

    /// Key-value backend failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// JSON encoding of the workout collection failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
