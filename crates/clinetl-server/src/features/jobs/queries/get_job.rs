//! Get job query
//!
//! Query to get the full record of a single job by ID.

use clinetl_common::types::JobDetails;
use serde::{Deserialize, Serialize};

use crate::ingest::{EngineError, JobEngine};

/// Query to get a job by ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetJobQuery {
    pub job_id: String,
}

pub async fn handle(engine: &JobEngine, query: GetJobQuery) -> Result<JobDetails, EngineError> {
    engine.details(&query.job_id).await
}
