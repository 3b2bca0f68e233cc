//! HTTP API client for the clinical ETL server

use crate::api::endpoints;
use crate::error::{CliError, Result};
use clinetl_common::types::{
    HealthResponse, JobAccepted, JobDetails, JobList, JobState, JobStatusResponse,
    SubmitJobRequest,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via ETL_API_TIMEOUT_SECS environment variable.
/// Waited submissions hold the request open for the whole load.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Default ETL server URL when neither `--server-url` nor ETL_SERVER_URL is set.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// API client for the ETL server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Result<Self> {
        let timeout_secs = std::env::var("ETL_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check server health
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = endpoints::health_url(&self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::parse(response, None).await
    }

    /// Submit a job; with `wait` the server answers once the job is terminal
    pub async fn submit_job(&self, request: &SubmitJobRequest, wait: bool) -> Result<JobAccepted> {
        let url = endpoints::submit_url(&self.base_url, wait);
        tracing::debug!(%url, job_id = %request.job_id, "Submitting job");

        let response = self.client.post(&url).json(request).send().await?;
        Self::parse(response, Some(&request.job_id)).await
    }

    /// Get the status of a job
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        let url = endpoints::job_status_url(&self.base_url, job_id);
        let response = self.client.get(&url).send().await?;
        Self::parse(response, Some(job_id)).await
    }

    /// Get the full record of a job
    pub async fn get_job(&self, job_id: &str) -> Result<JobDetails> {
        let url = endpoints::job_url(&self.base_url, job_id);
        let response = self.client.get(&url).send().await?;
        Self::parse(response, Some(job_id)).await
    }

    /// List jobs, optionally filtered by status
    pub async fn list_jobs(&self, status: Option<JobState>) -> Result<JobList> {
        let url = endpoints::list_url(&self.base_url, status.as_ref().map(JobState::as_str));
        let response = self.client.get(&url).send().await?;
        Self::parse(response, None).await
    }

    /// Decode a success body, or turn the server's error envelope into a [`CliError`]
    async fn parse<T: DeserializeOwned>(response: Response, job_id: Option<&str>) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        if let (StatusCode::NOT_FOUND, Some(job_id)) = (status, job_id) {
            return Err(CliError::JobNotFound(job_id.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or(text);

        Err(CliError::api(status.as_u16(), message))
    }
}
