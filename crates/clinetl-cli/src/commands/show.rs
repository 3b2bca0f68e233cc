//! `clinetl show` command implementation

use crate::api::ApiClient;
use crate::error::Result;
use crate::OutputFormat;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

use super::{is_json, print_json};

/// Show the full record of a job
pub async fn run(client: &ApiClient, job_id: &str, format: OutputFormat) -> Result<()> {
    let job = client.get_job(job_id).await?;

    if is_json(format) {
        return print_json(&job);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    table.add_row(vec!["Job", job.job_id.as_str()]);
    table.add_row(vec!["Status", job.status.as_str()]);
    table.add_row(vec!["Progress", &format!("{}%", job.progress)]);
    table.add_row(vec!["File", job.filename.as_str()]);
    table.add_row(vec!["Study", job.study_id.as_str()]);
    table.add_row(vec!["Message", job.message.as_str()]);

    if let Some(rows) = job.rows_loaded {
        table.add_row(vec!["Rows loaded", &rows.to_string()]);
    }

    table.add_row(vec!["Created", &job.created_at.to_rfc3339()]);
    table.add_row(vec!["Updated", &job.updated_at.to_rfc3339()]);

    if let Some(completed_at) = job.completed_at {
        table.add_row(vec!["Completed", &completed_at.to_rfc3339()]);
    }

    println!("{}", table);

    if let Some(error) = job.error {
        println!("{} {}", "Error:".red().bold(), error);
    }

    Ok(())
}
