//! Nearest-height lookup on a reference curve

use crate::error::{EngineError, Result};
use crate::models::ReferenceCurvePoint;

/// Find the reference point closest in height to `height_cm`
///
/// `curve` must be sorted by ascending height. When the target lies exactly
/// halfway between two rows, the lower-height row is returned; among rows of
/// equal height the first one wins.
///
/// An empty curve fails with an `EmptyCurveError` that names no gender; the
/// classifier fills in the gender it looked up.
pub fn resolve(curve: &[ReferenceCurvePoint], height_cm: f64) -> Result<&ReferenceCurvePoint> {
    let (first, last) = match (curve.first(), curve.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(EngineError::EmptyCurveError {
                gender: String::new(),
            });
        }
    };

    // First row at or above the target
    let upper = curve.partition_point(|point| point.height_cm < height_cm);
    if upper == 0 {
        return Ok(first);
    }
    if upper == curve.len() {
        return Ok(first_with_height(curve, last.height_cm));
    }

    let below = &curve[upper - 1];
    let above = &curve[upper];
    if above.height_cm - height_cm < height_cm - below.height_cm {
        Ok(above)
    } else {
        Ok(first_with_height(curve, below.height_cm))
    }
}

fn first_with_height(curve: &[ReferenceCurvePoint], height_cm: f64) -> &ReferenceCurvePoint {
    let idx = curve.partition_point(|point| point.height_cm < height_cm);
    &curve[idx]
}
