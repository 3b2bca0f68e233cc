//! Transactional row storage
//!
//! A [`RowStore`] hands out one [`RowSink`] per load. The sink owns a single
//! open transaction: rows appended to it become visible only after
//! [`RowSink::commit`], and [`RowSink::rollback`] discards all of them.
//! A sink is never shared between loads.

use async_trait::async_trait;
use thiserror::Error;

use super::models::MeasurementRow;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRowStore;
pub use postgres::PgRowStore;

/// Storage failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// A single row was refused (constraint violation, bad value for a column)
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// The store cannot be reached or the transaction was lost
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Source of load transactions
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Open a new transaction
    async fn begin(&self) -> Result<Box<dyn RowSink>, SinkError>;
}

/// One open load transaction
#[async_trait]
pub trait RowSink: Send {
    async fn append(&mut self, row: &MeasurementRow) -> Result<(), SinkError>;

    async fn commit(self: Box<Self>) -> Result<(), SinkError>;

    async fn rollback(self: Box<Self>) -> Result<(), SinkError>;
}
