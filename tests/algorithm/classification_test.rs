//! Tests for weight-for-height classification against loaded curves

use growth_screen::algorithm::growth::{classify_with_config, status_for_weight};
use growth_screen::{
    EngineConfig, NutritionalStatus, ReferenceCurvePoint, ReferenceStore, ZScoreThresholds,
    classify, resolve,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::reference_store;

#[test]
fn test_weight_between_pos1_and_pos2_is_overweight_risk() {
    let store = reference_store();
    let result = classify(Some(17.0), Some(100.0), "F", &store);

    assert_eq!(result.status, NutritionalStatus::OverweightRisk);
    assert_eq!(result.bmi, Some(17.0));
    assert_eq!(result.reference_height_cm, Some(100.0));
    assert_eq!(result.color(), "gold");
}

#[test]
fn test_upper_cut_is_inclusive() {
    let store = reference_store();

    let at_cut = classify(Some(18.0), Some(100.0), "F", &store);
    assert_eq!(at_cut.status, NutritionalStatus::OverweightRisk);

    let above_cut = classify(Some(18.01), Some(100.0), "F", &store);
    assert_eq!(above_cut.status, NutritionalStatus::Overweight);
}

#[test]
fn test_every_band_is_reachable() {
    let store = reference_store();
    let cases = [
        (10.0, NutritionalStatus::SevereThinness),
        (11.0, NutritionalStatus::Thinness),
        (12.5, NutritionalStatus::Normal),
        (16.0, NutritionalStatus::OverweightRisk),
        (19.0, NutritionalStatus::Overweight),
        (20.5, NutritionalStatus::Obesity),
    ];

    for (weight, expected) in cases {
        let result = classify(Some(weight), Some(100.0), "F", &store);
        assert_eq!(result.status, expected, "weight {weight}");
        assert!(!result.status.is_sentinel());
    }
}

#[test]
fn test_zero_weight_is_insufficient_data() {
    let store = reference_store();
    let result = classify(Some(0.0), Some(110.0), "M", &store);

    assert_eq!(result.status, NutritionalStatus::InsufficientData);
    assert_eq!(result.bmi, None);
    assert_eq!(result.reference_height_cm, None);
    assert_eq!(result.color(), "gray");
}

#[test]
fn test_missing_values_are_insufficient_data() {
    let store = reference_store();

    for (weight, height) in [
        (None, Some(100.0)),
        (Some(17.0), None),
        (Some(-1.0), Some(100.0)),
        (Some(17.0), Some(f64::NAN)),
    ] {
        let result = classify(weight, height, "F", &store);
        assert_eq!(result.status, NutritionalStatus::InsufficientData);
    }

    // Checked before the gender lookup
    let result = classify(None, Some(100.0), "X", &store);
    assert_eq!(result.status, NutritionalStatus::InsufficientData);
}

#[test]
fn test_unknown_gender_is_calculation_error() {
    let store = reference_store();
    let result = classify(Some(17.0), Some(100.0), "X", &store);

    assert_eq!(result.status, NutritionalStatus::CalculationError);
    assert_eq!(result.bmi, Some(17.0));
    assert_eq!(result.reference_height_cm, None);
}

#[test]
fn test_halfway_height_uses_lower_row() {
    let store = reference_store();

    // 101 cm is equidistant from the 100 and 102 rows
    let result = classify(Some(18.2), Some(101.0), "F", &store);
    assert_eq!(result.reference_height_cm, Some(100.0));
    assert_eq!(result.status, NutritionalStatus::Overweight);

    let result = classify(Some(18.2), Some(101.1), "F", &store);
    assert_eq!(result.reference_height_cm, Some(102.0));
    assert_eq!(result.status, NutritionalStatus::OverweightRisk);
}

#[test]
fn test_heights_outside_curve_clamp_to_ends() {
    let store = reference_store();

    let short = classify(Some(15.0), Some(60.0), "M", &store);
    assert_eq!(short.reference_height_cm, Some(100.0));

    let tall = classify(Some(15.0), Some(180.0), "M", &store);
    assert_eq!(tall.reference_height_cm, Some(110.0));
    assert_eq!(tall.status, NutritionalStatus::Normal);
}

#[test]
fn test_bmi_precision_follows_config() {
    let store = reference_store();
    let config = EngineConfig {
        bmi_decimals: 1,
        ..EngineConfig::default()
    };

    let result = classify_with_config(Some(20.0), Some(115.0), "M", &store, &config);
    assert_eq!(result.bmi, Some(15.1));

    let result = classify(Some(20.0), Some(115.0), "M", &store);
    assert_eq!(result.bmi, Some(15.12));
}

#[test]
fn test_resolve_matches_classifier_choice() {
    let store = reference_store();
    let point = resolve(store.curve_for("M"), 107.4).unwrap();
    assert_eq!(point.height_cm, 105.0);

    let result = classify(Some(16.0), Some(107.4), "M", &store);
    assert_eq!(result.reference_height_cm, Some(point.height_cm));
}

#[test]
fn test_random_weights_fall_in_exactly_one_band() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..500 {
        // Random non-decreasing thresholds
        let mut values = [0.0; 7];
        let mut current = rng.random_range(5.0..15.0);
        for slot in &mut values {
            current += rng.random_range(0.0..2.5);
            *slot = current;
        }
        let thresholds = ZScoreThresholds::from_array(values);
        let height = rng.random_range(45.0..120.0);
        let store = ReferenceStore::from_points([ReferenceCurvePoint::new(
            "F", height, thresholds,
        )]);

        let weight = rng.random_range(1.0..35.0);
        let result = classify(Some(weight), Some(height), "F", &store);
        let expected = expected_band(weight, &thresholds);

        assert_eq!(result.status, expected, "weight {weight} thresholds {values:?}");
        assert_eq!(status_for_weight(weight, &thresholds), expected);
        assert!(!result.status.is_sentinel());
    }
}

fn expected_band(weight: f64, t: &ZScoreThresholds) -> NutritionalStatus {
    let bands = [
        (weight < t.z_neg3, NutritionalStatus::SevereThinness),
        (
            t.z_neg3 <= weight && weight < t.z_neg2,
            NutritionalStatus::Thinness,
        ),
        (
            t.z_neg2 <= weight && weight < t.z_pos1,
            NutritionalStatus::Normal,
        ),
        (
            t.z_pos1 <= weight && weight <= t.z_pos2,
            NutritionalStatus::OverweightRisk,
        ),
        (
            t.z_pos2 < weight && weight <= t.z_pos3,
            NutritionalStatus::Overweight,
        ),
        (weight > t.z_pos3, NutritionalStatus::Obesity),
    ];

    let matching: Vec<NutritionalStatus> = bands
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, status)| *status)
        .collect();
    assert_eq!(matching.len(), 1, "weight {weight} thresholds {t:?}");
    matching[0]
}
