//! Error types shared across the clinetl workspace

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, EtlError>;

/// Main error type for values crossing crate boundaries
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid job status: {0} (expected running, completed or failed)")]
    InvalidJobState(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
