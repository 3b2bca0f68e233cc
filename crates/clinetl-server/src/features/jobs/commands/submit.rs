//! Submit job command
//!
//! Registers a job with the engine and either returns straight away
//! (`running`) or, with `wait`, after the load has reached a terminal state.

use clinetl_common::types::{JobAccepted, SubmitJobRequest};
use serde::{Deserialize, Serialize};

use crate::ingest::{EngineError, JobEngine, JobSubmission};

/// Command to start an ETL job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobCommand {
    pub job_id: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_id: Option<String>,
    /// Block until the job is `completed` or `failed`
    #[serde(default)]
    pub wait: bool,
}

impl SubmitJobCommand {
    pub fn from_request(request: SubmitJobRequest, wait: bool) -> Self {
        Self {
            job_id: request.job_id,
            filename: request.filename,
            study_id: request.study_id,
            wait,
        }
    }

    pub fn submission(&self) -> JobSubmission {
        let submission = JobSubmission::new(self.job_id.clone(), self.filename.clone());
        match &self.study_id {
            Some(study_id) => submission.with_study(study_id.clone()),
            None => submission,
        }
    }
}

/// Empty ids and file names are rejected by the engine before registration.
pub async fn handle(engine: &JobEngine, command: SubmitJobCommand) -> Result<JobAccepted, EngineError> {
    let submission = command.submission();

    if command.wait {
        engine.submit_and_wait(submission).await
    } else {
        engine.submit(submission).await
    }
}
