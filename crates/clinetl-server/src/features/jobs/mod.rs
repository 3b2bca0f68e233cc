//! Jobs feature module
//!
//! Submission of ETL jobs and read access to their status. Commands and
//! queries are plain request structs with a free `handle` function that
//! drives the [`JobEngine`](crate::ingest::JobEngine).

pub mod commands;
pub mod queries;
pub mod routes;


pub use routes::jobs_routes;
