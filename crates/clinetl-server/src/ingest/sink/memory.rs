//! In-process row store
//!
//! Rows are staged per transaction and published to the shared committed
//! set only on commit. Used when the server runs with `ETL_STORE=memory`.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{RowSink, RowStore, SinkError};
use crate::ingest::models::MeasurementRow;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRowStore {
    committed: Arc<RwLock<Vec<MeasurementRow>>>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every committed row
    pub async fn rows(&self) -> Vec<MeasurementRow> {
        self.committed.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.committed.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.committed.read().await.is_empty()
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn begin(&self) -> Result<Box<dyn RowSink>, SinkError> {
        Ok(Box::new(InMemorySink {
            staged: Vec::new(),
            committed: Arc::clone(&self.committed),
        }))
    }
}

struct InMemorySink {
    staged: Vec<MeasurementRow>,
    committed: Arc<RwLock<Vec<MeasurementRow>>>,
}

#[async_trait]
impl RowSink for InMemorySink {
    async fn append(&mut self, row: &MeasurementRow) -> Result<(), SinkError> {
        self.staged.push(row.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), SinkError> {
        let InMemorySink { staged, committed } = *self;
        committed.write().await.extend(staged);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinetl_ingest::Record;

    fn row(participant: &str) -> MeasurementRow {
        MeasurementRow::from_record(&Record::from_pairs([("participant_id", participant)]), "unknown")
    }

    #[tokio::test]
    async fn test_rows_visible_only_after_commit() {
        let store = InMemoryRowStore::new();
        let mut sink = store.begin().await.unwrap();

        sink.append(&row("P-001")).await.unwrap();
        sink.append(&row("P-002")).await.unwrap();
        assert!(store.is_empty().await);

        sink.commit().await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_rollback_discards_staged_rows() {
        let store = InMemoryRowStore::new();
        let mut sink = store.begin().await.unwrap();

        sink.append(&row("P-001")).await.unwrap();
        sink.rollback().await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_transactions_are_isolated() {
        let store = InMemoryRowStore::new();
        let mut first = store.begin().await.unwrap();
        let mut second = store.begin().await.unwrap();

        first.append(&row("P-001")).await.unwrap();
        second.append(&row("P-002")).await.unwrap();
        second.rollback().await.unwrap();
        first.commit().await.unwrap();

        let rows = store.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participant_id.as_deref(), Some("P-001"));
    }
}
