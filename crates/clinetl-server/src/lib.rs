//! Clinical ETL Server Library
//!
//! HTTP service that loads clinical measurement files into PostgreSQL.
//!
//! # Overview
//!
//! - **Job Engine**: one extract-transform-load run per submitted job, loaded
//!   inside a single transaction so a job writes all of its rows or none
//! - **Row Stores**: PostgreSQL through SQLx, or an in-memory store
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS and request logging
//!
//! # Architecture
//!
//! Routes under `/api/v1` follow a command/query split:
//!
//! - **Commands** (Write Operations): submitting a job (`POST /jobs`)
//! - **Queries** (Read Operations): job status, details and listing
//!
//! Both are thin handlers over [`ingest::JobEngine`], which owns the job
//! table and spawns one task per load.
//!
//! # Example
//!
//! ```no_run
//! use clinetl_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = api::build_store(&config).await?;
//!     let engine = api::build_engine(&config, store);
//!     let app = api::create_router(engine, &config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;

// Re-export commonly used types
pub use error::{AppError, AppResult};
