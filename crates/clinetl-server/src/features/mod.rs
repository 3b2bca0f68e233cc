//! Feature modules implementing the ETL API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes:
//! - `commands/` - Write operations (submit)
//! - `queries/` - Read operations (get, list, status)
//! - `routes.rs` - HTTP route definitions
//!
//! # Features
//!
//! - **jobs**: ETL job submission and status tracking

pub mod jobs;

use axum::Router;

use crate::ingest::JobEngine;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Engine owning the job table and the load pipeline
    pub engine: JobEngine,
}

/// Creates the API router with all feature routes mounted
///
/// - `/jobs` - ETL job submission and status
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().nest("/jobs", jobs::jobs_routes().with_state(state.engine))
}
