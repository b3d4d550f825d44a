//! Weight-for-height classification
//!
//! Decision ladder, evaluated against the reference row nearest in height:
//!
//! | weight                        | status          |
//! |-------------------------------|-----------------|
//! | `< z_neg3`                    | Severe thinness |
//! | `z_neg3 <= w < z_neg2`        | Thinness        |
//! | `z_neg2 <= w < z_pos1`        | Normal          |
//! | `z_pos1 <= w <= z_pos2`       | Overweight risk |
//! | `z_pos2 < w <= z_pos3`        | Overweight      |
//! | `> z_pos3`                    | Obesity         |
//!
//! The lower cuts are strict and the two upper cuts inclusive. BMI is
//! reported alongside but never consulted.

use log::debug;

use super::resolver::resolve;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    ClassificationResult, Measurement, NutritionalStatus, ReferenceCurvePoint, ZScoreThresholds,
    compute_bmi,
};
use crate::registry::ReferenceStore;

/// Map a weight onto the six-band ladder of one reference row
#[must_use]
pub fn status_for_weight(weight_kg: f64, thresholds: &ZScoreThresholds) -> NutritionalStatus {
    if weight_kg < thresholds.z_neg3 {
        NutritionalStatus::SevereThinness
    } else if weight_kg < thresholds.z_neg2 {
        NutritionalStatus::Thinness
    } else if weight_kg < thresholds.z_pos1 {
        NutritionalStatus::Normal
    } else if weight_kg <= thresholds.z_pos2 {
        NutritionalStatus::OverweightRisk
    } else if weight_kg <= thresholds.z_pos3 {
        NutritionalStatus::Overweight
    } else {
        NutritionalStatus::Obesity
    }
}

/// Classify a weight/height pair for a gender
///
/// Missing or non-positive weight or height yields `Insufficient Data`;
/// a gender without a reference curve yields `Calculation Error`.
#[must_use]
pub fn classify(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    gender: &str,
    store: &ReferenceStore,
) -> ClassificationResult {
    classify_with_config(weight_kg, height_cm, gender, store, &EngineConfig::default())
}

/// Classify a weight/height pair with explicit configuration
#[must_use]
pub fn classify_with_config(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    gender: &str,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> ClassificationResult {
    let bmi = compute_bmi(weight_kg, height_cm, config.bmi_decimals);
    let (Some(weight), Some(height)) = (positive(weight_kg), positive(height_cm)) else {
        return ClassificationResult::sentinel(NutritionalStatus::InsufficientData, bmi);
    };

    let point = match nearest_point(store, gender, height) {
        Ok(point) => point,
        Err(e) => {
            debug!("Cannot classify: {e}");
            return ClassificationResult::sentinel(NutritionalStatus::CalculationError, bmi);
        }
    };

    ClassificationResult {
        status: status_for_weight(weight, &point.thresholds),
        bmi,
        reference_height_cm: Some(point.height_cm),
    }
}

/// Classify one measurement of a student
#[must_use]
pub fn classify_measurement(
    measurement: &Measurement,
    gender: &str,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> ClassificationResult {
    classify_with_config(
        measurement.weight_kg,
        measurement.height_cm,
        gender,
        store,
        config,
    )
}

/// Nearest reference row on the curve of `gender`
fn nearest_point<'a>(
    store: &'a ReferenceStore,
    gender: &str,
    height_cm: f64,
) -> Result<&'a ReferenceCurvePoint> {
    resolve(store.curve_for(gender), height_cm).map_err(|e| match e {
        EngineError::EmptyCurveError { .. } => EngineError::EmptyCurveError {
            gender: gender.to_string(),
        },
        other => other,
    })
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
