//! Extraction errors

use thiserror::Error;

/// Errors raised while opening or reading a record source
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The source could not be opened, or a read failed partway through
    #[error("Source unavailable: '{source_ref}': {reason}")]
    SourceUnavailable { source_ref: String, reason: String },
}

impl ExtractError {
    pub fn unavailable(source_ref: impl Into<String>, reason: impl ToString) -> Self {
        ExtractError::SourceUnavailable {
            source_ref: source_ref.into(),
            reason: reason.to_string(),
        }
    }
}
