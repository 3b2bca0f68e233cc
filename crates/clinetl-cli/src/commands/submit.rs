//! `clinetl submit` command implementation

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use crate::OutputFormat;
use clinetl_common::types::{JobState, SubmitJobRequest};

use super::{is_json, paint, print_json};

/// Submit a job and print the acknowledgement
///
/// With `wait`, a job that ends `failed` is reported as an error.
pub async fn run(
    client: &ApiClient,
    job_id: String,
    filename: String,
    study_id: Option<String>,
    wait: bool,
    format: OutputFormat,
) -> Result<()> {
    let request = SubmitJobRequest {
        job_id,
        filename,
        study_id,
    };

    let accepted = client.submit_job(&request, wait).await?;

    if is_json(format) {
        print_json(&accepted)?;
    } else {
        println!("Job {}: {}", accepted.job_id, paint(accepted.status));
        println!("  {}", accepted.message);
        if accepted.status == JobState::Running {
            println!("  Track it with 'clinetl status {}'", accepted.job_id);
        }
    }

    if accepted.status == JobState::Failed {
        return Err(CliError::JobFailed {
            job_id: accepted.job_id,
            message: accepted.message,
        });
    }

    Ok(())
}
