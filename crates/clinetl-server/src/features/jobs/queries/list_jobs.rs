//! List jobs query
//!
//! Lists every job this process knows about, newest first, optionally
//! filtered by status.

use clinetl_common::types::{JobList, JobState};
use clinetl_common::EtlError;
use serde::{Deserialize, Serialize};

use crate::ingest::JobEngine;

/// Query parameters for listing jobs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListJobsQuery {
    /// One of `running`, `completed`, `failed`
    pub status: Option<String>,
}

impl ListJobsQuery {
    fn state(&self) -> Result<Option<JobState>, EtlError> {
        self.status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<JobState>)
            .transpose()
    }
}

pub async fn handle(engine: &JobEngine, query: ListJobsQuery) -> Result<JobList, EtlError> {
    let state = query.state()?;
    let jobs = engine.list(state).await;

    Ok(JobList {
        total: jobs.len(),
        jobs,
    })
}
