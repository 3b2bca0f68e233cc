//! Error types for the clinetl CLI
//!
//! Messages are user-facing and say what to check next.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The server answered with an error body
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server does not know the job
    #[error("Job '{0}' not found. Run 'clinetl list' to see known jobs.")]
    JobNotFound(String),

    /// A job reached the `failed` state
    #[error("Job '{job_id}' failed: {message}")]
    JobFailed { job_id: String, message: String },

    /// HTTP request failed
    #[error("Network request failed: {0}. Ensure the ETL server is running and --server-url is correct.")]
    Http(#[from] reqwest::Error),

    /// JSON encoding failed
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
