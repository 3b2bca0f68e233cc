//! Job commands

pub mod submit;

pub use submit::SubmitJobCommand;
