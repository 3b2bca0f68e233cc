//! Measurement rows and the record-to-row transform
//!
//! The transform is permissive: every value is carried through as the raw
//! string the source produced. A field the record lacks becomes `None` and is
//! stored as NULL. Type checking happens in the store's column types.

use chrono::{DateTime, Utc};
use clinetl_ingest::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Table that measurement rows are loaded into.
pub const MEASUREMENTS_TABLE: &str = "clinical_measurements";

/// Quality score assigned to every loaded row.
pub const DEFAULT_QUALITY_SCORE: i32 = 100;

/// Source field names read by the transform.
pub mod fields {
    pub const STUDY_ID: &str = "study_id";
    pub const PARTICIPANT_ID: &str = "participant_id";
    pub const MEASUREMENT_TYPE: &str = "measurement_type";
    pub const VALUE: &str = "value";
    pub const UNIT: &str = "unit";
    pub const TIMESTAMP: &str = "timestamp";
    pub const SITE_ID: &str = "site_id";
}

/// One row of `clinical_measurements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub id: Uuid,
    pub study_id: String,
    pub participant_id: Option<String>,
    pub measurement_type: Option<String>,
    /// Raw value; not parsed
    pub value: Option<String>,
    pub unit: Option<String>,
    /// Raw timestamp; not parsed
    pub timestamp: Option<String>,
    pub site_id: Option<String>,
    pub quality_score: i32,
    pub processed_at: DateTime<Utc>,
}

impl MeasurementRow {
    /// Transform a source record into a row for the given job
    ///
    /// `job_study` tags the row when the record carries no `study_id` of its
    /// own (missing or empty).
    pub fn from_record(record: &Record, job_study: &str) -> Self {
        let field = |name: &str| record.get(name).map(str::to_string);

        let study_id = record
            .get(fields::STUDY_ID)
            .filter(|s| !s.is_empty())
            .unwrap_or(job_study)
            .to_string();

        Self {
            id: Uuid::new_v4(),
            study_id,
            participant_id: field(fields::PARTICIPANT_ID),
            measurement_type: field(fields::MEASUREMENT_TYPE),
            value: field(fields::VALUE),
            unit: field(fields::UNIT),
            timestamp: field(fields::TIMESTAMP),
            site_id: field(fields::SITE_ID),
            quality_score: DEFAULT_QUALITY_SCORE,
            processed_at: Utc::now(),
        }
    }
}
