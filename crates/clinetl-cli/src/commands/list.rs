//! `clinetl list` command implementation

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use crate::OutputFormat;
use clinetl_common::types::JobState;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

use super::{is_json, print_json};

/// List jobs known to the server
pub async fn run(client: &ApiClient, status: Option<&str>, format: OutputFormat) -> Result<()> {
    let state = status
        .map(|s| s.parse::<JobState>())
        .transpose()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    let list = client.list_jobs(state).await?;

    if is_json(format) {
        return print_json(&list);
    }

    if list.jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Job", "Status", "File", "Study", "Rows", "Created"]);

    for job in &list.jobs {
        table.add_row(vec![
            job.job_id.clone(),
            job.status.to_string(),
            job.filename.clone(),
            job.study_id.clone(),
            job.rows_loaded.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            job.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{}", table);
    println!("Total: {}", list.total);

    Ok(())
}
