//! Clinical ETL CLI Library
//!
//! Command-line client for the clinical ETL server.
//!
//! # Overview
//!
//! - **Submission**: start a load from a file in the server's data directory (`clinetl submit`)
//! - **Status**: poll a job (`clinetl status`) or print its full record (`clinetl show`)
//! - **Listing**: list known jobs, optionally by status (`clinetl list`)
//! - **Health**: check the server is up (`clinetl health`)

pub mod api;
pub mod commands;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand, ValueEnum};

/// clinetl - Clinical measurement ETL client
#[derive(Parser, Debug)]
#[command(name = "clinetl")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Server URL
    #[arg(long, env = "ETL_SERVER_URL", default_value = api::DEFAULT_SERVER_URL, global = true)]
    pub server_url: String,
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit an ETL job
    Submit {
        /// Job identifier
        job_id: String,

        /// Source file name, relative to the server's data directory
        filename: String,

        /// Study tag for rows whose file has no study_id
        #[arg(short, long)]
        study_id: Option<String>,

        /// Wait for the job to finish and exit non-zero if it failed
        #[arg(short, long)]
        wait: bool,
    },

    /// Show the status of a job
    Status {
        /// Job identifier
        job_id: String,
    },

    /// Show the full record of a job
    Show {
        /// Job identifier
        job_id: String,
    },

    /// List jobs known to the server
    List {
        /// Only jobs in this state (running, completed, failed)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Check server health
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "clinetl", "submit", "job-1", "vitals.csv", "--study-id", "S1", "--wait",
        ])
        .unwrap();

        match cli.command {
            Commands::Submit {
                job_id,
                filename,
                study_id,
                wait,
            } => {
                assert_eq!(job_id, "job-1");
                assert_eq!(filename, "vitals.csv");
                assert_eq!(study_id.as_deref(), Some("S1"));
                assert!(wait);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_server_url_default() {
        if std::env::var_os("ETL_SERVER_URL").is_some() {
            return;
        }
        let cli = Cli::try_parse_from(["clinetl", "health"]).unwrap();
        assert_eq!(cli.server_url, api::DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_parse_global_format() {
        let cli = Cli::try_parse_from(["clinetl", "list", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
