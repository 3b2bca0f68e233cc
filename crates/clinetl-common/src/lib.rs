//! Clinical ETL Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the clinetl workspace.
//!
//! # Overview
//!
//! This crate provides functionality used by every workspace member:
//!
//! - **Error Handling**: The shared [`EtlError`] type and [`Result`] alias
//! - **Logging**: Centralized `tracing` subscriber setup
//! - **Types**: Job wire types exchanged between the server and its clients
//!
//! # Example
//!
//! ```no_run
//! use clinetl_common::types::JobState;
//!
//! fn is_done(raw: &str) -> clinetl_common::Result<bool> {
//!     let state: JobState = raw.parse()?;
//!     Ok(state.is_terminal())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{EtlError, Result};
