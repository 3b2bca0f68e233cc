//! Job routes
//!
//! # Route Structure
//!
//! - `POST /api/v1/jobs` - Submit a job (`?wait=true` blocks until it finishes)
//! - `GET /api/v1/jobs` - List jobs, optionally `?status=running|completed|failed`
//! - `GET /api/v1/jobs/:job_id` - Full job record
//! - `GET /api/v1/jobs/:job_id/status` - Status, progress and message

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clinetl_common::types::SubmitJobRequest;
use serde::Deserialize;

use super::commands::{submit::handle as handle_submit, SubmitJobCommand};
use super::queries::{
    get_job::handle as handle_get_job, get_status::handle as handle_get_status,
    list_jobs::handle as handle_list_jobs, GetJobQuery, GetJobStatusQuery, ListJobsQuery,
};
use crate::error::AppResult;
use crate::ingest::JobEngine;

/// Create job routes, to be nested under `/jobs`
pub fn jobs_routes() -> Router<JobEngine> {
    Router::new()
        .route("/", get(list_jobs).post(submit_job))
        .route("/:job_id", get(get_job))
        .route("/:job_id/status", get(get_job_status))
}

#[derive(Debug, Default, Deserialize)]
struct SubmitParams {
    #[serde(default)]
    wait: bool,
}

/// Submit a job
///
/// POST /jobs
async fn submit_job(
    State(engine): State<JobEngine>,
    Query(params): Query<SubmitParams>,
    Json(request): Json<SubmitJobRequest>,
) -> AppResult<Response> {
    let command = SubmitJobCommand::from_request(request, params.wait);
    let status = if command.wait {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };

    let accepted = handle_submit(&engine, command).await?;
    Ok((status, Json(accepted)).into_response())
}

/// List all jobs
///
/// GET /jobs?status=failed
async fn list_jobs(
    State(engine): State<JobEngine>,
    Query(query): Query<ListJobsQuery>,
) -> AppResult<Response> {
    let jobs = handle_list_jobs(&engine, query).await?;
    Ok((StatusCode::OK, Json(jobs)).into_response())
}

/// Get a specific job by ID
///
/// GET /jobs/:job_id
async fn get_job(
    State(engine): State<JobEngine>,
    Path(job_id): Path<String>,
) -> AppResult<Response> {
    let job = handle_get_job(&engine, GetJobQuery { job_id }).await?;
    Ok((StatusCode::OK, Json(job)).into_response())
}

/// Get the status of a job
///
/// GET /jobs/:job_id/status
async fn get_job_status(
    State(engine): State<JobEngine>,
    Path(job_id): Path<String>,
) -> AppResult<Response> {
    let status = handle_get_status(&engine, GetJobStatusQuery { job_id }).await?;
    Ok((StatusCode::OK, Json(status)).into_response())
}
