//! Domain models for growth screening
//!
//! Students and their measurements, WHO reference rows and the
//! classification results derived from them.

pub mod classification;
pub mod reference;
pub mod student;

// Re-export commonly used types
pub use classification::{ClassificationResult, NutritionalStatus, compute_bmi};
pub use reference::{ReferenceCurvePoint, ZScoreThresholds};
pub use student::{Measurement, StudentOverride, StudentRecord};
