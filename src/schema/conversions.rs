//! Converting raw columns into canonical column types.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Float64Builder, StringArray, StringBuilder};
use arrow::compute::kernels::cast;
use arrow::datatypes::DataType;

use crate::error::{EngineError, Result};

/// Parse a decimal number, accepting comma as decimal separator
///
/// Returns `None` for blank, unparseable and non-finite input.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Convert any Arrow array to a nullable `Float64` array
///
/// Values that fail coercion become null, never zero.
pub fn convert_to_float64(array: &ArrayRef) -> Result<ArrayRef> {
    match array.data_type() {
        DataType::Float64 => {
            let floats = downcast::<Float64Array>(array, "Float64")?;
            Ok(drop_non_finite(floats))
        }
        source if source.is_numeric() => {
            let casted = cast::cast(array, &DataType::Float64)?;
            let floats = downcast::<Float64Array>(&casted, "Float64")?;
            Ok(drop_non_finite(floats))
        }
        _ => {
            let strings = cast::cast(array, &DataType::Utf8)?;
            let strings = downcast::<StringArray>(&strings, "String")?;

            let mut builder = Float64Builder::with_capacity(strings.len());
            for i in 0..strings.len() {
                if strings.is_null(i) {
                    builder.append_null();
                } else {
                    builder.append_option(parse_decimal(strings.value(i)));
                }
            }
            Ok(Arc::new(builder.finish()) as ArrayRef)
        }
    }
}

/// Convert any Arrow array to a trimmed `Utf8` array
///
/// Blank cells become null. With `upper_case` set, values are upper-cased
/// (used for gender codes).
pub fn convert_to_text(array: &ArrayRef, upper_case: bool) -> Result<ArrayRef> {
    let strings = if array.data_type() == &DataType::Utf8 {
        array.clone()
    } else {
        cast::cast(array, &DataType::Utf8)?
    };
    let strings = downcast::<StringArray>(&strings, "String")?;

    let mut builder = StringBuilder::with_capacity(strings.len(), strings.len() * 8);
    for i in 0..strings.len() {
        if strings.is_null(i) {
            builder.append_null();
            continue;
        }
        let value = strings.value(i).trim();
        if value.is_empty() {
            builder.append_null();
        } else if upper_case {
            builder.append_value(value.to_uppercase());
        } else {
            builder.append_value(value);
        }
    }
    Ok(Arc::new(builder.finish()) as ArrayRef)
}

/// Create a `Utf8` array repeating one value
#[must_use]
pub fn constant_string_array(value: &str, length: usize) -> ArrayRef {
    Arc::new(StringArray::from(vec![value; length])) as ArrayRef
}

fn drop_non_finite(array: &Float64Array) -> ArrayRef {
    let cleaned: Float64Array = array
        .iter()
        .map(|value| value.filter(|v| v.is_finite()))
        .collect();
    Arc::new(cleaned) as ArrayRef
}

fn downcast<'a, A: Array + 'static>(array: &'a ArrayRef, expected: &str) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| EngineError::InvalidDataType {
            column: array.data_type().to_string(),
            expected: expected.to_string(),
        })
}
