//! Job engine
//!
//! Drives one extract-transform-load run per submitted job:
//!
//! 1. register the job as `running` (visible to status queries immediately)
//! 2. open a transaction on the row store
//! 3. open the record source
//! 4. transform and append every record, stopping at the first failure
//! 5. commit and mark the job `completed`
//! 6. on any failure, roll back and mark the job `failed`
//!
//! Steps 2-6 run on a spawned task, so [`JobEngine::submit`] returns as soon
//! as the job is registered. [`JobEngine::submit_and_wait`] keeps the
//! blocking behaviour for callers that want the terminal outcome in the
//! response. Either way a job loads all of its rows or none of them.

use clinetl_common::types::{JobAccepted, JobDetails, JobState, JobStatusResponse, UNKNOWN_STUDY};
use clinetl_ingest::RecordSource;
use futures::{FutureExt, TryStreamExt};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn, Instrument};

use super::error::{EngineError, LoadError};
use super::jobs::{Job, JobTable};
use super::models::MeasurementRow;
use super::sink::{RowSink, RowStore};

/// A job as submitted by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSubmission {
    pub job_id: String,
    pub source_ref: String,
    pub study_ref: Option<String>,
}

impl JobSubmission {
    pub fn new(job_id: impl Into<String>, source_ref: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            source_ref: source_ref.into(),
            study_ref: None,
        }
    }

    pub fn with_study(mut self, study_ref: impl Into<String>) -> Self {
        self.study_ref = Some(study_ref.into());
        self
    }

    /// Reject empty job ids and source references
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.job_id.trim().is_empty() {
            return Err(EngineError::Validation("jobId is required".to_string()));
        }
        if self.source_ref.trim().is_empty() {
            return Err(EngineError::Validation("filename is required".to_string()));
        }
        Ok(())
    }
}

/// Owns job lifecycle and runs loads
#[derive(Clone)]
pub struct JobEngine {
    jobs: JobTable,
    source: Arc<dyn RecordSource>,
    store: Arc<dyn RowStore>,
}

impl JobEngine {
    pub fn new(jobs: JobTable, source: Arc<dyn RecordSource>, store: Arc<dyn RowStore>) -> Self {
        Self { jobs, source, store }
    }

    /// Register a job and start loading it in the background
    ///
    /// The acknowledgement always reports `running`; poll [`Self::status`]
    /// for the outcome.
    ///
    /// # Errors
    ///
    /// - `Validation` if the job id or source reference is empty
    /// - `JobAlreadyRunning` if a load for the same id is still in flight
    pub async fn submit(&self, submission: JobSubmission) -> Result<JobAccepted, EngineError> {
        let (accepted, _task) = self.start(submission).await?;
        Ok(accepted)
    }

    /// Register a job, run the load to completion, and report the outcome
    pub async fn submit_and_wait(
        &self,
        submission: JobSubmission,
    ) -> Result<JobAccepted, EngineError> {
        let (accepted, task) = self.start(submission).await?;

        match task.await {
            Ok(job) => Ok(job.accepted()),
            Err(e) => {
                // The load future catches panics itself; this is a cancelled runtime.
                let detail = LoadError::Aborted(e.to_string()).to_string();
                Ok(self
                    .jobs
                    .fail(&accepted.job_id, detail)
                    .await
                    .map(|job| job.accepted())
                    .unwrap_or(accepted))
            }
        }
    }

    /// Current status of a job
    pub async fn status(&self, job_id: &str) -> Result<JobStatusResponse, EngineError> {
        self.find(job_id).await.map(|job| job.status())
    }

    /// Full record of a job
    pub async fn details(&self, job_id: &str) -> Result<JobDetails, EngineError> {
        self.find(job_id).await.map(|job| job.details())
    }

    /// Every job known to this process, newest first
    pub async fn list(&self, state: Option<JobState>) -> Vec<JobDetails> {
        self.jobs
            .list(state)
            .await
            .iter()
            .map(Job::details)
            .collect()
    }

    /// Wait until no job is `running`, giving up after `timeout`
    ///
    /// Returns `false` if jobs were still in flight when the timeout hit.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let drained = async {
            while !self.jobs.list(Some(JobState::Running)).await.is_empty() {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        };

        tokio::time::timeout(timeout, drained).await.is_ok()
    }

    async fn find(&self, job_id: &str) -> Result<Job, EngineError> {
        self.jobs
            .get(job_id)
            .await
            .ok_or_else(|| EngineError::JobNotFound(job_id.to_string()))
    }

    async fn start(
        &self,
        submission: JobSubmission,
    ) -> Result<(JobAccepted, JoinHandle<Job>), EngineError> {
        submission.validate()?;

        let study_ref = submission
            .study_ref
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_STUDY.to_string());
        let job = self
            .jobs
            .register(Job::new(submission.job_id, submission.source_ref, study_ref))
            .await?;

        info!(
            job_id = %job.id,
            source_ref = %job.source_ref,
            study_ref = %job.study_ref,
            "Job submitted"
        );

        let accepted = job.accepted();
        let span = tracing::info_span!("etl_job", job_id = %job.id);
        let engine = self.clone();
        let task = tokio::spawn(async move { engine.run(job).await }.instrument(span));

        Ok((accepted, task))
    }

    /// Load the job and record its outcome, returning the terminal job
    async fn run(&self, job: Job) -> Job {
        let outcome = AssertUnwindSafe(self.load(&job))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(LoadError::Aborted("load task panicked".to_string())));

        let finished = match outcome {
            Ok(rows) => {
                info!(rows, "Job completed");
                self.jobs.complete(&job.id, rows).await
            }
            Err(e) => {
                error!(error = %e, "Job failed");
                self.jobs.fail(&job.id, e.to_string()).await
            }
        };

        // Only this task moves its job out of `running`.
        finished.unwrap_or(job)
    }

    #[tracing::instrument(skip_all, fields(source_ref = %job.source_ref))]
    async fn load(&self, job: &Job) -> Result<u64, LoadError> {
        let mut sink = self.store.begin().await?;

        match self.stream_into(sink.as_mut(), job).await {
            Ok(rows) => {
                sink.commit().await?;
                Ok(rows)
            }
            Err(e) => {
                if let Err(rollback_err) = sink.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed after load error");
                }
                Err(e)
            }
        }
    }

    async fn stream_into(&self, sink: &mut dyn RowSink, job: &Job) -> Result<u64, LoadError> {
        let mut records = self.source.open(&job.source_ref).await?;
        let mut rows: u64 = 0;

        while let Some(record) = records.try_next().await? {
            let row = MeasurementRow::from_record(&record, &job.study_ref);
            sink.append(&row)
                .await
                .map_err(|source| LoadError::Append { row: rows + 1, source })?;
            rows += 1;
        }

        Ok(rows)
    }
}
