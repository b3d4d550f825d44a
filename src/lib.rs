//! Growth screening for school anthropometry sheets.
//!
//! Normalizes heterogeneous class spreadsheets (already loaded as Arrow
//! tables) into a canonical schema and classifies each student's
//! weight-for-height against WHO reference curves.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod registry;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::EngineConfig;
pub use error::{EngineError, Result};

// Normalization
pub use schema::{CanonicalField, CanonicalTable, SynonymTable, normalize, normalize_columns};

// Reference data
pub use registry::{ReferenceCache, ReferenceStore};

// Models
pub use models::{
    ClassificationResult, Measurement, NutritionalStatus, ReferenceCurvePoint, StudentOverride,
    StudentRecord, ZScoreThresholds,
};

// Classification
pub use algorithm::growth::{
    ClassDistribution, RosterEntry, StudentSeries, aggregate, classify, classify_roster, resolve,
};
pub use collections::Roster;

// Arrow types
pub use arrow::record_batch::RecordBatch;
