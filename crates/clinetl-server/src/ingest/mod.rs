//! Clinical measurement ingestion
//!
//! Jobs read a delimited file through a [`clinetl_ingest::RecordSource`],
//! map each record to a [`MeasurementRow`] and write the rows to a
//! [`RowStore`] inside a single transaction.

pub mod engine;
pub mod error;
pub mod jobs;
pub mod models;
pub mod sink;

pub use engine::{JobEngine, JobSubmission};
pub use error::{EngineError, LoadError};
pub use jobs::{Job, JobTable};
pub use models::{MeasurementRow, MEASUREMENTS_TABLE};
pub use sink::{InMemoryRowStore, PgRowStore, RowSink, RowStore, SinkError};
