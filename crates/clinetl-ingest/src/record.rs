//! Records and the source capability that produces them

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

use crate::error::ExtractError;

/// Lazy, finite, single-pass sequence of records
pub type RecordStream = BoxStream<'static, Result<Record, ExtractError>>;

/// Capability that opens a source reference as a record stream
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Open `source_ref` for reading
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceUnavailable`] when the source cannot be
    /// opened or its header cannot be read.
    async fn open(&self, source_ref: &str) -> Result<RecordStream, ExtractError>;
}

/// One data row keyed by the source's header field names
///
/// Field names are shared between all records of a stream. Looking up a name
/// that the header does not declare, or that a short row does not reach,
/// yields `None` rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn new(fields: Arc<[String]>, values: Vec<String>) -> Self {
        Self { fields, values }
    }

    /// Build a standalone record from `(field, value)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let (fields, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .unzip();
        Self::new(fields.into(), values)
    }

    /// Raw value for `field`
    ///
    /// When the header repeats a name the right-most column wins.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() == field)
            .last()
            .and_then(|(idx, _)| self.values.get(idx))
            .map(String::as_str)
    }

    /// Field names declared by the source header
    /// `(field, value)` pairs present in this row, in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .zip(self.values.iter())
            .map(|(f, v)| (f.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|n| n.to_string()).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_get_known_field() {
        let record = Record::new(
            header(&["participant_id", "value"]),
            vec!["P-001".to_string(), "120.5".to_string()],
        );

        assert_eq!(record.get("participant_id"), Some("P-001"));
        assert_eq!(record.get("value"), Some("120.5"));
    }

    #[test]
    fn test_missing_field_is_none() {
        let record = Record::from_pairs([("participant_id", "P-001")]);

        assert_eq!(record.get("site_id"), None);
    }

    #[test]
    fn test_short_row_reads_missing_trailing_fields() {
        let record = Record::new(
            header(&["participant_id", "value", "unit"]),
            vec!["P-001".to_string()],
        );

        assert_eq!(record.get("participant_id"), Some("P-001"));
        assert_eq!(record.get("value"), None);
        assert_eq!(record.get("unit"), None);
        assert_eq!(record.iter().count(), 1);
    }

    #[test]
    fn test_empty_value_is_present() {
        let record = Record::from_pairs([("unit", "")]);

        assert_eq!(record.get("unit"), Some(""));
    }

    #[test]
    fn test_duplicate_header_last_column_wins() {
        let record = Record::new(
            header(&["value", "value"]),
            vec!["1".to_string(), "2".to_string()],
        );

        assert_eq!(record.get("value"), Some("2"));
    }
}
