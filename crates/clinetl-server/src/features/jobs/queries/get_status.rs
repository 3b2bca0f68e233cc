//! Get job status query

use clinetl_common::types::JobStatusResponse;
use serde::{Deserialize, Serialize};

use crate::ingest::{EngineError, JobEngine};

/// Query for the current status of one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetJobStatusQuery {
    pub job_id: String,
}

pub async fn handle(
    engine: &JobEngine,
    query: GetJobStatusQuery,
) -> Result<JobStatusResponse, EngineError> {
    engine.status(&query.job_id).await
}
