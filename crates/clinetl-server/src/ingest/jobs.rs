//! Job records and the process-wide job table
//!
//! The table lives for the lifetime of the process and is never pruned.
//! All mutation goes through [`JobTable`], which takes the write lock for the
//! whole update so readers see either the old or the new status, progress
//! and message together.

use chrono::{DateTime, Utc};
use clinetl_common::types::{JobAccepted, JobDetails, JobState, JobStatusResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::EngineError;
use super::models::MEASUREMENTS_TABLE;

/// Message of a freshly registered job.
pub const STARTING_MESSAGE: &str = "Starting job";

/// Tracked state of one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub source_ref: String,
    pub study_ref: String,
    pub state: JobState,
    pub progress: u8,
    pub message: String,
    pub rows_loaded: Option<u64>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(id: String, source_ref: String, study_ref: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            source_ref,
            study_ref,
            state: JobState::Running,
            progress: 0,
            message: STARTING_MESSAGE.to_string(),
            rows_loaded: None,
            error: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    fn complete(&mut self, rows: u64) {
        let now = Utc::now();
        self.state = JobState::Completed;
        self.progress = 100;
        self.message = format!("Inserted {} rows into {}", rows, MEASUREMENTS_TABLE);
        self.rows_loaded = Some(rows);
        self.updated_at = now;
        self.completed_at = Some(now);
    }

    // Progress keeps whatever value it last had.
    fn fail(&mut self, detail: String) {
        let now = Utc::now();
        self.state = JobState::Failed;
        self.message = format!("ETL failed: {}", detail);
        self.error = Some(detail);
        self.updated_at = now;
        self.completed_at = Some(now);
    }

    pub fn accepted(&self) -> JobAccepted {
        JobAccepted {
            job_id: self.id.clone(),
            status: self.state,
            message: self.message.clone(),
        }
    }

    pub fn status(&self) -> JobStatusResponse {
        JobStatusResponse {
            job_id: self.id.clone(),
            status: self.state,
            progress: self.progress,
            message: self.message.clone(),
        }
    }

    pub fn details(&self) -> JobDetails {
        JobDetails {
            job_id: self.id.clone(),
            filename: self.source_ref.clone(),
            study_id: self.study_ref.clone(),
            status: self.state,
            progress: self.progress,
            message: self.message.clone(),
            rows_loaded: self.rows_loaded,
            error: self.error.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        }
    }
}

/// Shared, lock-guarded map from job id to job
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new running job
    ///
    /// A job whose previous run is still `running` is rejected. A terminal
    /// entry under the same id is replaced, discarding its history.
    pub async fn register(&self, job: Job) -> Result<Job, EngineError> {
        let mut jobs = self.jobs.write().await;

        if let Some(existing) = jobs.get(&job.id) {
            if !existing.state.is_terminal() {
                return Err(EngineError::JobAlreadyRunning(job.id));
            }
            tracing::warn!(
                job_id = %job.id,
                previous_status = %existing.state,
                "Resubmitted job id replaces previous run"
            );
        }

        jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    pub async fn get(&self, id: &str) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    /// All jobs, newest first, optionally filtered by state
    pub async fn list(&self, state: Option<JobState>) -> Vec<Job> {
        let mut jobs: Vec<Job> = self
            .jobs
            .read()
            .await
            .values()
            .filter(|job| state.map_or(true, |s| job.state == s))
            .cloned()
            .collect();

        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        jobs
    }

    /// Transition a running job to `completed`
    ///
    /// Returns `None` when the job is unknown or already terminal.
    pub async fn complete(&self, id: &str, rows: u64) -> Option<Job> {
        self.transition(id, |job| job.complete(rows)).await
    }

    /// Transition a running job to `failed`
    pub async fn fail(&self, id: &str, detail: impl Into<String>) -> Option<Job> {
        let detail = detail.into();
        self.transition(id, move |job| job.fail(detail)).await
    }

    async fn transition(&self, id: &str, apply: impl FnOnce(&mut Job)) -> Option<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id).filter(|job| !job.state.is_terminal())?;
        apply(&mut *job);
        Some(job.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> Job {
        Job::new(id.to_string(), "vitals.csv".to_string(), "unknown".to_string())
    }

    #[tokio::test]
    async fn test_register_starts_running() {
        let table = JobTable::new();
        table.register(job("job-1")).await.unwrap();

        let status = table.get("job-1").await.unwrap().status();
        assert_eq!(status.status, JobState::Running);
        assert_eq!(status.progress, 0);
        assert_eq!(status.message, STARTING_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_rejects_running_duplicate() {
        let table = JobTable::new();
        table.register(job("job-1")).await.unwrap();

        let err = table.register(job("job-1")).await.unwrap_err();
        assert_eq!(err, EngineError::JobAlreadyRunning("job-1".to_string()));
    }

    #[tokio::test]
    async fn test_register_replaces_terminal_job() {
        let table = JobTable::new();
        table.register(job("job-1")).await.unwrap();
        table.complete("job-1", 3).await.unwrap();

        table.register(job("job-1")).await.unwrap();

        let job = table.get("job-1").await.unwrap();
        assert_eq!(job.state, JobState::Running);
        assert_eq!(job.progress, 0);
        assert_eq!(job.rows_loaded, None);
    }

    #[tokio::test]
    async fn test_complete_sets_progress_and_message() {
        let table = JobTable::new();
        table.register(job("job-1")).await.unwrap();

        let job = table.complete("job-1", 3).await.unwrap();
        assert_eq!(job.state, JobState::Completed);
        assert_eq!(job.progress, 100);
        assert_eq!(job.message, "Inserted 3 rows into clinical_measurements");
        assert!(job.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_fail_keeps_progress() {
        let table = JobTable::new();
        table.register(job("job-1")).await.unwrap();

        let job = table.fail("job-1", "Store unavailable: pool timed out").await.unwrap();
        assert_eq!(job.state, JobState::Failed);
        assert_eq!(job.progress, 0);
        assert_eq!(job.message, "ETL failed: Store unavailable: pool timed out");
        assert_eq!(job.error.as_deref(), Some("Store unavailable: pool timed out"));
    }

    #[tokio::test]
    async fn test_terminal_state_is_final() {
        let table = JobTable::new();
        table.register(job("job-1")).await.unwrap();
        table.fail("job-1", "boom").await.unwrap();

        assert!(table.complete("job-1", 10).await.is_none());
        assert_eq!(table.get("job-1").await.unwrap().state, JobState::Failed);
    }

    #[tokio::test]
    async fn test_list_filters_by_state() {
        let table = JobTable::new();
        table.register(job("job-1")).await.unwrap();
        table.register(job("job-2")).await.unwrap();
        table.complete("job-2", 1).await.unwrap();

        let completed = table.list(Some(JobState::Completed)).await;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "job-2");
        assert_eq!(table.list(None).await.len(), 2);
    }
}
