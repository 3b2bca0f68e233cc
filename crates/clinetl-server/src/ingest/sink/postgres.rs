//! PostgreSQL row store
//!
//! Inserts into an externally provisioned `clinical_measurements` table.
//! `value` and `timestamp` arrive as raw text and are cast in SQL, so a value
//! the column type cannot hold is refused by Postgres and surfaces as
//! [`SinkError::WriteRejected`].

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{RowSink, RowStore, SinkError};
use crate::ingest::models::MeasurementRow;

// Expected schema:
//   id uuid, study_id text, participant_id text, measurement_type text,
//   value numeric, unit text, timestamp timestamptz, site_id text,
//   quality_score integer, processed_at timestamptz
// The casts on $5 and $7 assume those column types; drop them if the table
// keeps value or timestamp as text.
const INSERT_MEASUREMENT: &str = r#"
    INSERT INTO clinical_measurements (
        id, study_id, participant_id, measurement_type,
        value, unit, timestamp, site_id, quality_score, processed_at
    ) VALUES (
        $1, $2, $3, $4, $5::numeric, $6, $7::timestamptz, $8, $9, $10
    )
"#;

/// Row store backed by a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgRowStore {
    pool: PgPool,
}

impl PgRowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RowStore for PgRowStore {
    async fn begin(&self) -> Result<Box<dyn RowSink>, SinkError> {
        let tx = self.pool.begin().await.map_err(classify)?;
        Ok(Box::new(PgRowSink { tx }))
    }
}

struct PgRowSink {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RowSink for PgRowSink {
    async fn append(&mut self, row: &MeasurementRow) -> Result<(), SinkError> {
        sqlx::query(INSERT_MEASUREMENT)
            .bind(row.id)
            .bind(&row.study_id)
            .bind(&row.participant_id)
            .bind(&row.measurement_type)
            .bind(&row.value)
            .bind(&row.unit)
            .bind(&row.timestamp)
            .bind(&row.site_id)
            .bind(row.quality_score)
            .bind(row.processed_at)
            .execute(&mut *self.tx)
            .await
            .map_err(classify)?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), SinkError> {
        self.tx.commit().await.map_err(classify)
    }

    async fn rollback(self: Box<Self>) -> Result<(), SinkError> {
        self.tx.rollback().await.map_err(classify)
    }
}

/// Map a driver error onto the storage taxonomy
///
/// Errors reported by the server are row-level rejections unless their
/// SQLSTATE class says the connection or server went away (08, 53, 57).
fn classify(err: sqlx::Error) -> SinkError {
    match err {
        sqlx::Error::Database(ref db_err) => {
            let unavailable = db_err
                .code()
                .map(|code| matches!(code.get(..2), Some("08" | "53" | "57")))
                .unwrap_or(false);

            if unavailable {
                SinkError::StoreUnavailable(db_err.message().to_string())
            } else {
                SinkError::WriteRejected(db_err.message().to_string())
            }
        }
        other => SinkError::StoreUnavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_unavailable() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            SinkError::StoreUnavailable(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer"
            ))),
            SinkError::StoreUnavailable(_)
        ));
    }

    #[test]
    fn test_insert_targets_measurements_table() {
        assert!(INSERT_MEASUREMENT.contains(crate::ingest::models::MEASUREMENTS_TABLE));
        assert_eq!(INSERT_MEASUREMENT.matches('$').count(), 10);
    }
}
