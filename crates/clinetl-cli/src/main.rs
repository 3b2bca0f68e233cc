//! clinetl CLI - Main entry point

use clap::Parser;
use clinetl_cli::{api::ApiClient, commands, Cli, Commands};
use clinetl_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let defaults = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("clinetl-cli")
        .build();

    // Environment variables take precedence; the CLI works without logging
    let log_config = defaults.clone().merge_env().unwrap_or(defaults);
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> clinetl_cli::Result<()> {
    let client = ApiClient::new(cli.server_url.clone())?;

    match &cli.command {
        Commands::Submit {
            job_id,
            filename,
            study_id,
            wait,
        } => {
            commands::submit::run(
                &client,
                job_id.clone(),
                filename.clone(),
                study_id.clone(),
                *wait,
                cli.format,
            )
            .await
        }

        Commands::Status { job_id } => commands::status::run(&client, job_id, cli.format).await,

        Commands::Show { job_id } => commands::show::run(&client, job_id, cli.format).await,

        Commands::List { status } => {
            commands::list::run(&client, status.as_deref(), cli.format).await
        }

        Commands::Health => commands::health::run(&client, cli.format).await,
    }
}
