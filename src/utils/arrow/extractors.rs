//! Field extraction utilities for canonical tables
//!
//! This module provides helpers for reading typed values of one row of a
//! normalized table, with missing columns and null cells both read as `None`.

use crate::error::Result;
use crate::schema::{CanonicalField, CanonicalTable};
use arrow::array::Array;

/// Extract a text value from a canonical table
///
/// # Arguments
///
/// * `table` - The canonical table to extract from
/// * `row` - The row index
/// * `field` - The canonical field
/// * `required` - Whether the column is required
///
/// # Returns
///
/// * `Ok(Some(String))` - The extracted value
/// * `Ok(None)` - If the cell is null or the column is absent (and not required)
/// * `Err` - If a required column is absent or has the wrong type
pub fn extract_text(
    table: &CanonicalTable,
    row: usize,
    field: CanonicalField,
    required: bool,
) -> Result<Option<String>> {
    let Some(array) = table.text_column(field)? else {
        return missing(table, field, required);
    };

    if row < array.len() && !array.is_null(row) {
        let value = array.value(row);
        if !value.is_empty() {
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

/// Extract a float value from a canonical table
///
/// # Returns
///
/// * `Ok(Some(f64))` - The extracted value
/// * `Ok(None)` - If the cell is null or the column is absent (and not required)
/// * `Err` - If a required column is absent or has the wrong type
pub fn extract_f64(
    table: &CanonicalTable,
    row: usize,
    field: CanonicalField,
    required: bool,
) -> Result<Option<f64>> {
    let Some(array) = table.numeric_column(field)? else {
        return missing(table, field, required);
    };

    if row < array.len() && !array.is_null(row) {
        return Ok(Some(array.value(row)));
    }
    Ok(None)
}

/// Extract all seven z-score thresholds of a row, or `None` if any is missing
pub fn extract_z_scores(table: &CanonicalTable, row: usize) -> Result<Option<[f64; 7]>> {
    let mut values = [0.0; 7];
    for (slot, field) in values.iter_mut().zip(CanonicalField::Z_SCORES) {
        match extract_f64(table, row, field, false)? {
            Some(value) => *slot = value,
            None => return Ok(None),
        }
    }
    Ok(Some(values))
}

fn missing<T>(table: &CanonicalTable, field: CanonicalField, required: bool) -> Result<Option<T>> {
    if required {
        table.require(field)?;
    }
    Ok(None)
}
