//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod health;
pub mod list;
pub mod show;
pub mod status;
pub mod submit;

use crate::error::Result;
use crate::OutputFormat;
use clinetl_common::types::JobState;
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Print a value as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Job state colored for terminal output
pub(crate) fn paint(state: JobState) -> ColoredString {
    match state {
        JobState::Running => state.as_str().yellow(),
        JobState::Completed => state.as_str().green(),
        JobState::Failed => state.as_str().red(),
    }
}

pub(crate) fn is_json(format: OutputFormat) -> bool {
    format == OutputFormat::Json
}
