//! Clinical ETL Ingest Library
//!
//! Record extraction for delimited-text sources.
//!
//! A [`RecordSource`] turns a source reference into a lazy, single-pass
//! stream of [`Record`]s in on-disk order. Each record maps the header's
//! field names to the raw strings of one data row. Values are never parsed
//! or validated here; that is left to whoever consumes the stream.
//!
//! # Example
//!
//! ```no_run
//! use clinetl_ingest::{CsvRecordSource, RecordSource};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CsvRecordSource::new("/app/data");
//!     let mut records = source.open("measurements.csv").await?;
//!
//!     while let Some(record) = records.try_next().await? {
//!         println!("{:?}", record.get("participant_id"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod csv;
pub mod error;
pub mod record;

pub use self::csv::CsvRecordSource;
pub use error::ExtractError;
pub use record::{Record, RecordSource, RecordStream};
