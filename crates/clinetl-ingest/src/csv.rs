//! File-backed delimited-text source
//!
//! Source references are file names resolved against a data directory.
//! The first row is the header; the remaining rows become records.
//! Rows shorter or longer than the header are accepted as-is.

use async_trait::async_trait;
use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord};
use futures::stream::{self, StreamExt};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tracing::debug;

use crate::error::ExtractError;
use crate::record::{Record, RecordSource, RecordStream};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Reads comma-separated (or other single-byte delimited) files from a directory
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    data_dir: PathBuf,
    delimiter: u8,
}

impl CsvRecordSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Resolve a source reference to a path inside the data directory
    ///
    /// Only plain relative paths are accepted; absolute paths and `..`
    /// components are rejected so a reference cannot leave the directory.
    pub fn resolve(&self, source_ref: &str) -> Result<PathBuf, ExtractError> {
        let relative = Path::new(source_ref);

        if source_ref.trim().is_empty() {
            return Err(ExtractError::unavailable(source_ref, "empty source reference"));
        }

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ExtractError::unavailable(
                source_ref,
                "source reference must be a relative path inside the data directory",
            ));
        }

        Ok(self.data_dir.join(relative))
    }
}

#[async_trait]
impl RecordSource for CsvRecordSource {
    #[tracing::instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    async fn open(&self, source_ref: &str) -> Result<RecordStream, ExtractError> {
        let path = self.resolve(source_ref)?;

        let file = File::open(&path)
            .await
            .map_err(|e| ExtractError::unavailable(source_ref, e))?;

        let mut reader = AsyncReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .create_reader(file);

        let fields: Arc<[String]> = reader
            .headers()
            .await
            .map_err(|e| ExtractError::unavailable(source_ref, e))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into();

        debug!(path = %path.display(), fields = ?fields, "Opened delimited source");

        Ok(record_stream(reader, fields, source_ref.to_string()))
    }
}

/// Pull rows one at a time from the reader; nothing is buffered ahead.
fn record_stream(
    reader: AsyncReader<File>,
    fields: Arc<[String]>,
    source_ref: String,
) -> RecordStream {
    stream::try_unfold(reader, |mut reader| async move {
        let mut row = StringRecord::new();
        match reader.read_record(&mut row).await {
            Ok(true) => Ok(Some((row, reader))),
            Ok(false) => Ok(None),
            Err(e) => Err(e),
        }
    })
    .map(move |row: Result<StringRecord, csv_async::Error>| {
        row.map(|row| Record::new(fields.clone(), row.iter().map(str::to_string).collect()))
            .map_err(|e| ExtractError::unavailable(source_ref.as_str(), e))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, contents: impl AsRef<[u8]>) {
        let mut file = std::fs::File::create(dir.path().join(name)).unwrap();
        file.write_all(contents.as_ref()).unwrap();
    }

    async fn collect(source: &CsvRecordSource, name: &str) -> Vec<Record> {
        source.open(name).await.unwrap().try_collect().await.unwrap()
    }

    #[tokio::test]
    async fn test_reads_records_in_file_order() {
        let dir = TempDir::new().unwrap();
        write_source(
            &dir,
            "vitals.csv",
            "participant_id,value\nP-001,120\nP-002,130\nP-003,140\n",
        );

        let source = CsvRecordSource::new(dir.path());
        let records = collect(&source, "vitals.csv").await;

        let ids: Vec<_> = records.iter().map(|r| r.get("participant_id").unwrap()).collect();
        assert_eq!(ids, vec!["P-001", "P-002", "P-003"]);
    }

    #[tokio::test]
    async fn test_header_only_source_is_empty() {
        let dir = TempDir::new().unwrap();
        write_source(&dir, "empty.csv", "participant_id,value\n");

        let source = CsvRecordSource::new(dir.path());

        assert!(collect(&source, "empty.csv").await.is_empty());
    }

    #[tokio::test]
    async fn test_short_and_quoted_rows() {
        let dir = TempDir::new().unwrap();
        write_source(
            &dir,
            "ragged.csv",
            "participant_id,measurement_type,unit\nP-001,\"blood pressure, systolic\"\nP-002,weight,kg,extra\n",
        );

        let source = CsvRecordSource::new(dir.path());
        let records = collect(&source, "ragged.csv").await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("measurement_type"), Some("blood pressure, systolic"));
        assert_eq!(records[0].get("unit"), None);
        assert_eq!(records[1].get("unit"), Some("kg"));
    }

    #[tokio::test]
    async fn test_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        write_source(&dir, "vitals.tsv", "participant_id\tvalue\nP-001\t98.6\n");

        let source = CsvRecordSource::new(dir.path()).with_delimiter(b'\t');
        let records = collect(&source, "vitals.tsv").await;

        assert_eq!(records[0].get("value"), Some("98.6"));
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = CsvRecordSource::new(dir.path());

        let err = source.open("missing.csv").await.err().unwrap();

        assert!(matches!(
            err,
            ExtractError::SourceUnavailable { ref source_ref, .. } if source_ref == "missing.csv"
        ));
    }

    #[tokio::test]
    async fn test_undecodable_row_fails_stream_after_earlier_rows() {
        let dir = TempDir::new().unwrap();
        write_source(
            &dir,
            "bad.csv",
            b"study_id,participant_id,value\nS1,P-1,1\nS1,P-2,2\nS1,\xff\xfe,3\n",
        );

        let source = CsvRecordSource::new(dir.path());
        let mut records = source.open("bad.csv").await.unwrap();

        let first = records.try_next().await.unwrap().unwrap();
        assert_eq!(first.get("participant_id"), Some("P-1"));
        let second = records.try_next().await.unwrap().unwrap();
        assert_eq!(second.get("participant_id"), Some("P-2"));

        let err = records.try_next().await.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::SourceUnavailable { ref source_ref, .. } if source_ref == "bad.csv"
        ));

        let collected: Result<Vec<Record>, _> =
            source.open("bad.csv").await.unwrap().try_collect().await;
        assert!(matches!(collected, Err(ExtractError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_resolve_rejects_escaping_paths() {
        let source = CsvRecordSource::new("/app/data");

        assert!(source.resolve("../etc/passwd").is_err());
        assert!(source.resolve("/etc/passwd").is_err());
        assert!(source.resolve("").is_err());
        assert_eq!(
            source.resolve("study-42/vitals.csv").unwrap(),
            PathBuf::from("/app/data/study-42/vitals.csv")
        );
    }
}
