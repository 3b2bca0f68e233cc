//! Shared fixtures for the server integration tests
//!
//! - a temporary data directory with CSV fixtures
//! - [`FaultyRowStore`], a row store that fails on demand
//! - [`TestEnv`], an engine wired to both

#![allow(dead_code)]

use async_trait::async_trait;
use clinetl_ingest::CsvRecordSource;
use clinetl_server::ingest::{
    InMemoryRowStore, JobEngine, JobTable, MeasurementRow, RowSink, RowStore, SinkError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Notify;

pub const HEADER: &str = "study_id,participant_id,measurement_type,value,unit,timestamp,site_id";

/// Three well-formed measurements
pub const THREE_ROWS: &str = "\
study_id,participant_id,measurement_type,value,unit,timestamp,site_id
S1,P-001,heart_rate,72,bpm,2024-03-01T08:30:00Z,SITE-A
S1,P-002,systolic_bp,120,mmHg,2024-03-01T08:35:00Z,SITE-A
S1,P-003,temperature,36.8,C,2024-03-01T08:40:00Z,SITE-B
";

/// Which operation of [`FaultyRowStore`] should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    Begin,
    /// Reject the n-th appended row (1-based)
    AppendAt(u64),
    Commit,
}

/// Row store that injects storage failures and can hold loads open
#[derive(Clone)]
pub struct FaultyRowStore {
    fault: Fault,
    committed: InMemoryRowStore,
    rollbacks: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl FaultyRowStore {
    pub fn new(fault: Fault) -> Self {
        Self {
            fault,
            committed: InMemoryRowStore::new(),
            rollbacks: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Block every commit until `gate` is notified
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(Fault::None)
        }
    }

    pub async fn committed(&self) -> Vec<MeasurementRow> {
        self.committed.rows().await
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RowStore for FaultyRowStore {
    async fn begin(&self) -> Result<Box<dyn RowSink>, SinkError> {
        if self.fault == Fault::Begin {
            return Err(SinkError::StoreUnavailable("connection refused".to_string()));
        }

        Ok(Box::new(FaultySink {
            store: self.clone(),
            inner: self.committed.begin().await?,
            appended: 0,
        }))
    }
}

struct FaultySink {
    store: FaultyRowStore,
    inner: Box<dyn RowSink>,
    appended: u64,
}

#[async_trait]
impl RowSink for FaultySink {
    async fn append(&mut self, row: &MeasurementRow) -> Result<(), SinkError> {
        self.appended += 1;
        if self.store.fault == Fault::AppendAt(self.appended) {
            return Err(SinkError::WriteRejected(format!(
                "invalid input syntax for type numeric: \"{}\"",
                row.value.as_deref().unwrap_or_default()
            )));
        }
        self.inner.append(row).await
    }

    async fn commit(self: Box<Self>) -> Result<(), SinkError> {
        if let Some(gate) = &self.store.gate {
            gate.notified().await;
        }
        if self.store.fault == Fault::Commit {
            return Err(SinkError::StoreUnavailable("server closed the connection".to_string()));
        }
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), SinkError> {
        self.store.rollbacks.fetch_add(1, Ordering::SeqCst);
        self.inner.rollback().await
    }
}

/// Engine over a temporary data directory
pub struct TestEnv {
    pub dir: TempDir,
    pub engine: JobEngine,
}

impl TestEnv {
    pub fn new(store: impl RowStore + 'static) -> Self {
        let dir = TempDir::new().unwrap();
        let engine = JobEngine::new(
            JobTable::new(),
            Arc::new(CsvRecordSource::new(dir.path())),
            Arc::new(store),
        );
        Self { dir, engine }
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        std::fs::write(self.dir.path().join(name), contents).unwrap();
    }
}
