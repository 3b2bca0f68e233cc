//! API client module
//!
//! HTTP client for the clinical ETL server.

pub mod client;
pub mod endpoints;

pub use client::{ApiClient, DEFAULT_SERVER_URL};
