//! `clinetl status` command implementation

use crate::api::ApiClient;
use crate::error::Result;
use crate::OutputFormat;

use super::{is_json, paint, print_json};

/// Show the status of a job
pub async fn run(client: &ApiClient, job_id: &str, format: OutputFormat) -> Result<()> {
    let status = client.job_status(job_id).await?;

    if is_json(format) {
        return print_json(&status);
    }

    println!("Job {}: {} ({}%)", status.job_id, paint(status.status), status.progress);
    println!("  {}", status.message);

    Ok(())
}
