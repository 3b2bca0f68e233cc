//! Job engine errors

use clinetl_ingest::ExtractError;
use thiserror::Error;

use super::sink::SinkError;

/// Why a load failed
///
/// Never returned to a caller; it is rendered into the failed job's message.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] ExtractError),

    #[error("{source} (row {row})")]
    Append {
        row: u64,
        #[source]
        source: SinkError,
    },

    #[error(transparent)]
    Store(#[from] SinkError),

    #[error("Load task aborted: {0}")]
    Aborted(String),
}

/// Errors surfaced to callers of the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Job '{0}' is still running")]
    JobAlreadyRunning(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
