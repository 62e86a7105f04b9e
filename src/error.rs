//! Error types for Profilescout

use thiserror::Error;

/// Main error type for the search pipeline
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Query rejected before any search work
    #[error("Validation error: {0}")]
    Validation(String),

    /// Embedding generation failed
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Vector index error
    #[error("Vector index error: {0}")]
    VectorIndex(String),

    /// Profile dataset could not be produced or read
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScoutError>;
