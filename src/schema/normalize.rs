//! Schema normalization
//!
//! Maps the arbitrary headers of an uploaded sheet onto the canonical field
//! set, coerces value types and drops everything unrecognized.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::Schema;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use log::debug;
use rustc_hash::FxHashMap;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::schema::conversions::{constant_string_array, convert_to_float64, convert_to_text};
use crate::schema::field::{CanonicalField, FieldKind};
use crate::schema::synonyms::SynonymTable;

/// A table keyed exclusively by canonical fields
///
/// Columns appear in `CanonicalField` declaration order. Text fields are
/// `Utf8`, numeric fields nullable `Float64`.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    batch: RecordBatch,
    fields: Vec<CanonicalField>,
}

impl CanonicalTable {
    /// Number of rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Canonical fields present, in column order
    #[must_use]
    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    #[must_use]
    pub fn has(&self, field: CanonicalField) -> bool {
        self.fields.contains(&field)
    }

    /// Column for a canonical field, if present
    #[must_use]
    pub fn column(&self, field: CanonicalField) -> Option<&ArrayRef> {
        self.fields
            .iter()
            .position(|f| *f == field)
            .map(|idx| self.batch.column(idx))
    }

    /// Text column for a canonical field, if present
    pub fn text_column(&self, field: CanonicalField) -> Result<Option<&StringArray>> {
        self.column(field)
            .map(|array| {
                array
                    .as_any()
                    .downcast_ref::<StringArray>()
                    .ok_or_else(|| EngineError::InvalidDataType {
                        column: field.name().to_string(),
                        expected: "String".to_string(),
                    })
            })
            .transpose()
    }

    /// Numeric column for a canonical field, if present
    pub fn numeric_column(&self, field: CanonicalField) -> Result<Option<&Float64Array>> {
        self.column(field)
            .map(|array| {
                array
                    .as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| EngineError::InvalidDataType {
                        column: field.name().to_string(),
                        expected: "Float64".to_string(),
                    })
            })
            .transpose()
    }

    /// Fail with a schema error unless `field` is present
    pub fn require(&self, field: CanonicalField) -> Result<()> {
        if self.has(field) {
            Ok(())
        } else {
            let columns: Vec<String> = self.fields.iter().map(|f| f.name().to_string()).collect();
            Err(EngineError::missing_field(field.name(), &columns))
        }
    }

    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }
}

/// Decide which raw column supplies each canonical field
///
/// Columns are scanned left to right; when several raw headers map to the
/// same field, the rightmost one wins.
#[must_use]
pub fn map_headers(
    headers: &[String],
    synonyms: &SynonymTable,
) -> FxHashMap<CanonicalField, usize> {
    let mut mapping = FxHashMap::default();
    for (idx, header) in headers.iter().enumerate() {
        match synonyms.resolve(header) {
            Some(field) => {
                if let Some(previous) = mapping.insert(field, idx) {
                    debug!(
                        "Column '{}' replaces column '{}' as {field}",
                        header, headers[previous]
                    );
                }
            }
            None => debug!("Dropping unrecognized column '{header}'"),
        }
    }
    mapping
}

/// Normalize a student sheet; `student_name` is required
pub fn normalize(batch: &RecordBatch, synonyms: &SynonymTable) -> Result<CanonicalTable> {
    normalize_with_config(batch, synonyms, &EngineConfig::default())
}

/// Normalize a student sheet with explicit configuration
pub fn normalize_with_config(
    batch: &RecordBatch,
    synonyms: &SynonymTable,
    config: &EngineConfig,
) -> Result<CanonicalTable> {
    let table = normalize_columns(batch, synonyms, config)?;
    table.require(CanonicalField::StudentName)?;
    Ok(table)
}

/// Map and coerce columns without requiring any particular field
///
/// When no gender column is recognized, one is synthesized holding
/// `config.default_gender` for every row.
pub fn normalize_columns(
    batch: &RecordBatch,
    synonyms: &SynonymTable,
    config: &EngineConfig,
) -> Result<CanonicalTable> {
    let schema = batch.schema();
    let headers: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    let mapping = map_headers(&headers, synonyms);

    let mut fields = Vec::new();
    let mut columns = Vec::new();

    for field in CanonicalField::ALL {
        let column = match mapping.get(&field) {
            Some(&idx) => {
                if config.log_mappings {
                    debug!("Mapped column '{}' to {field}", headers[idx]);
                }
                convert_column(batch.column(idx), field)?
            }
            None if field == CanonicalField::Gender => {
                debug!(
                    "No gender column found, defaulting every row to '{}'",
                    config.default_gender
                );
                constant_string_array(&config.default_gender, batch.num_rows())
            }
            None => continue,
        };
        fields.push(field);
        columns.push(column);
    }

    let arrow_schema = Schema::new(
        fields
            .iter()
            .map(|field| field.arrow_field())
            .collect::<Vec<_>>(),
    );
    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    let normalized = RecordBatch::try_new_with_options(Arc::new(arrow_schema), columns, &options)?;

    Ok(CanonicalTable {
        batch: normalized,
        fields,
    })
}

fn convert_column(array: &ArrayRef, field: CanonicalField) -> Result<ArrayRef> {
    match field.kind() {
        FieldKind::Text => convert_to_text(array, false),
        FieldKind::Code => convert_to_text(array, true),
        FieldKind::Numeric => convert_to_float64(array),
    }
}
