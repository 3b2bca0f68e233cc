//! Job queries

pub mod get_job;
pub mod get_status;
pub mod list_jobs;

pub use get_job::GetJobQuery;
pub use get_status::GetJobStatusQuery;
pub use list_jobs::ListJobsQuery;
