//! Error handling for the growth classification engine.

use arrow::error::ArrowError;

/// Specialized error type for the engine
///
/// Only structural failures surface here. Row-level problems (missing weight,
/// unknown gender) are absorbed into sentinel statuses by the classifier.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A required canonical field is absent after normalization
    #[error("Schema error: required field '{field}' not found (columns: {columns:?})")]
    SchemaError {
        /// Canonical name of the missing field
        field: String,
        /// Canonical columns that were recognized
        columns: Vec<String>,
    },

    /// No reference rows are loaded for the requested gender
    #[error("No reference curve loaded for gender '{gender}'")]
    EmptyCurveError {
        /// Gender value that was looked up
        gender: String,
    },

    /// A column could not be read as the expected Arrow array type
    #[error("Column '{column}' is not a {expected} array")]
    InvalidDataType {
        /// Column name
        column: String,
        /// Human readable name of the expected type
        expected: String,
    },

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),

    /// Error converting results to or from Arrow via serde
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_arrow::Error),
}

impl EngineError {
    /// Build a schema error for a missing canonical field
    pub fn missing_field(field: &str, columns: &[String]) -> Self {
        Self::SchemaError {
            field: field.to_string(),
            columns: columns.to_vec(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
