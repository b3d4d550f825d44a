//! Arrow data handling utilities
//!
//! Helpers for reading typed values out of normalized Arrow tables.

pub mod extractors;

// Re-export commonly used functions for convenience
pub use extractors::{extract_f64, extract_text, extract_z_scores};
