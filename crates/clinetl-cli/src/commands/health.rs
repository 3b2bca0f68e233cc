//! `clinetl health` command implementation

use crate::api::ApiClient;
use crate::error::Result;
use crate::OutputFormat;
use colored::Colorize;

use super::{is_json, print_json};

/// Check server health
pub async fn run(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health = client.health().await?;

    if is_json(format) {
        return print_json(&health);
    }

    println!(
        "{} {} at {}",
        health.service.bold(),
        health.status.green(),
        client.base_url()
    );

    Ok(())
}
