//! Flat result rows for presentation layers
//!
//! Rows are plain serde structs and can be turned into an Arrow
//! `RecordBatch` with `serde_arrow`, or serialized as JSON.

use arrow::record_batch::RecordBatch;
use arrow_schema::FieldRef;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::algorithm::growth::{RosterEntry, StudentSeries};
use crate::error::Result;

/// One classified measurement, flattened for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRow {
    pub student_name: String,
    pub registration_id: Option<String>,
    pub gender: Option<String>,
    pub occasion_index: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub bmi: Option<f64>,
    pub status: String,
    pub color: String,
    pub rank: u8,
    pub reference_height_cm: Option<f64>,
}

impl From<&RosterEntry> for ClassificationRow {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            student_name: entry.student_name.clone(),
            registration_id: entry.registration_id.clone(),
            gender: entry.gender.clone(),
            occasion_index: entry.measurement.map(|m| m.occasion_index),
            weight_kg: entry.measurement.and_then(|m| m.weight_kg),
            height_cm: entry.measurement.and_then(|m| m.height_cm),
            bmi: entry.result.bmi,
            status: entry.result.status.label().to_string(),
            color: entry.result.color().to_string(),
            rank: entry.result.rank(),
            reference_height_cm: entry.result.reference_height_cm,
        }
    }
}

/// One row per occasion of a student series
#[must_use]
pub fn series_rows(series: &StudentSeries) -> Vec<ClassificationRow> {
    series
        .results
        .iter()
        .map(|occasion| ClassificationRow {
            student_name: series.student_name.clone(),
            registration_id: series.registration_id.clone(),
            gender: series.gender.clone(),
            occasion_index: Some(occasion.occasion_index),
            weight_kg: occasion.measurement.weight_kg,
            height_cm: occasion.measurement.height_cm,
            bmi: occasion.result.bmi,
            status: occasion.result.status.label().to_string(),
            color: occasion.result.color().to_string(),
            rank: occasion.result.rank(),
            reference_height_cm: occasion.result.reference_height_cm,
        })
        .collect()
}

/// One row per roster entry
#[must_use]
pub fn roster_rows(entries: &[RosterEntry]) -> Vec<ClassificationRow> {
    entries.iter().map(ClassificationRow::from).collect()
}

/// Convert result rows into an Arrow record batch
pub fn to_record_batch(rows: &[ClassificationRow]) -> Result<RecordBatch> {
    let fields = Vec::<FieldRef>::from_type::<ClassificationRow>(TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}

/// Read result rows back from a record batch produced by [`to_record_batch`]
pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<ClassificationRow>> {
    Ok(serde_arrow::from_record_batch(batch)?)
}
