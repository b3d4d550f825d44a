//! Tests for grouping sheet rows into students and classifying a class

use growth_screen::algorithm::growth::aggregate_with_config;
use growth_screen::export::{from_record_batch, roster_rows, series_rows, to_record_batch};
use growth_screen::{
    ClassDistribution, EngineConfig, EngineError, Measurement, NutritionalStatus, Roster,
    StudentOverride, StudentRecord, SynonymTable, aggregate, classify_roster, normalize,
    normalize_columns,
};

use crate::utils::{class_sheet, reference_store, string_batch};

fn class_roster() -> Roster {
    let table = normalize(&class_sheet(), &SynonymTable::default()).unwrap();
    Roster::from_table(&table).unwrap()
}

#[test]
fn test_rows_are_grouped_by_student() {
    let roster = class_roster();

    // The blank-name row is skipped
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.names(), vec!["Ana", "Bruno"]);

    let ana = roster.get("Ana").unwrap();
    assert_eq!(ana.registration_id.as_deref(), Some("A-1"));
    assert_eq!(ana.age.as_deref(), Some("5"));
    assert_eq!(ana.gender_code(), "F");
    assert_eq!(ana.measurements.len(), 2);
    assert_eq!(
        ana.current(),
        Some(&Measurement::new(2, Some(18.5), Some(101.0)))
    );

    let bruno = roster.get("Bruno").unwrap();
    assert_eq!(bruno.gender_code(), "M");
    assert_eq!(bruno.measurements.len(), 1);
    assert!(roster.get("Caio").is_none());
}

#[test]
fn test_row_order_numbers_occasions_without_column() {
    let batch = string_batch(&[
        ("Aluno", vec![Some("Ana"), Some("Ana"), Some("Ana")]),
        ("Peso", vec![Some("16"), Some("17"), Some("18")]),
        ("Altura", vec![Some("100"), Some("100"), Some("101")]),
    ]);
    let table = normalize(&batch, &SynonymTable::default()).unwrap();
    let roster = Roster::from_table(&table).unwrap();

    let ana = roster.get("Ana").unwrap();
    let occasions: Vec<u32> = ana.measurements.iter().map(|m| m.occasion_index).collect();
    assert_eq!(occasions, vec![1, 2, 3]);
    assert_eq!(ana.current().unwrap().weight_kg, Some(18.0));
    // Gender column was absent
    assert_eq!(ana.gender_code(), "M");
}

#[test]
fn test_roster_needs_student_names() {
    let batch = string_batch(&[("Peso", vec![Some("16")])]);
    let table =
        normalize_columns(&batch, &SynonymTable::default(), &EngineConfig::default()).unwrap();

    let err = Roster::from_table(&table).unwrap_err();
    assert!(matches!(err, EngineError::SchemaError { .. }));
}

#[test]
fn test_aggregate_has_one_result_per_occasion() {
    let roster = class_roster();
    let store = reference_store();

    let series = aggregate(roster.get("Ana").unwrap(), &store);

    assert_eq!(series.student_name, "Ana");
    assert_eq!(series.results.len(), 2);
    assert_eq!(series.results[0].occasion_index, 1);
    assert_eq!(
        series.results[0].result.status,
        NutritionalStatus::OverweightRisk
    );
    assert_eq!(series.results[0].result.bmi, Some(17.0));
    // 101 cm resolves to the 100 cm row
    let latest = series.latest().unwrap();
    assert_eq!(latest.occasion_index, 2);
    assert_eq!(latest.result.status, NutritionalStatus::Overweight);
    assert_eq!(latest.result.reference_height_cm, Some(100.0));
}

#[test]
fn test_incomplete_occasion_stays_in_series() {
    let store = reference_store();
    let student = StudentRecord::new("Caio")
        .with_gender("M")
        .with_measurement(Measurement::new(1, Some(16.0), Some(100.0)))
        .with_measurement(Measurement::new(2, None, Some(102.0)));

    let series = aggregate(&student, &store);

    assert_eq!(series.results.len(), 2);
    assert_eq!(series.results[0].result.status, NutritionalStatus::Normal);
    assert_eq!(
        series.results[1].result.status,
        NutritionalStatus::InsufficientData
    );
}

#[test]
fn test_classify_roster_keeps_roster_order() {
    let roster = class_roster();
    let store = reference_store();

    let entries = classify_roster(&roster, &store, &EngineConfig::default());

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].student_name, "Ana");
    assert_eq!(entries[0].result.status, NutritionalStatus::Overweight);
    assert_eq!(entries[1].student_name, "Bruno");
    assert_eq!(entries[1].result.status, NutritionalStatus::Normal);
    assert_eq!(entries[1].result.bmi, Some(16.0));
}

#[test]
fn test_parallel_and_sequential_agree() {
    let roster = class_roster();
    let store = reference_store();
    let sequential = EngineConfig {
        parallel: false,
        ..EngineConfig::default()
    };

    assert_eq!(
        classify_roster(&roster, &store, &EngineConfig::default()),
        classify_roster(&roster, &store, &sequential)
    );
}

#[test]
fn test_student_without_measurements_is_insufficient() {
    let mut roster = Roster::new();
    roster.insert(StudentRecord::new("Duda").with_gender("F"));

    let entries = classify_roster(&roster, &reference_store(), &EngineConfig::default());
    assert_eq!(entries[0].measurement, None);
    assert_eq!(entries[0].result.status, NutritionalStatus::InsufficientData);
}

#[test]
fn test_class_distribution() {
    let roster = class_roster();
    let store = reference_store();
    let entries = classify_roster(&roster, &store, &EngineConfig::default());

    let distribution = ClassDistribution::from_entries(&entries);

    assert_eq!(distribution.counts.len(), NutritionalStatus::ALL.len());
    assert_eq!(distribution.count(NutritionalStatus::Overweight), 1);
    assert_eq!(distribution.count(NutritionalStatus::Normal), 1);
    assert_eq!(distribution.count(NutritionalStatus::Obesity), 0);
    assert_eq!(distribution.total(), 2);
    assert_eq!(distribution.counts[0].0, NutritionalStatus::SevereThinness);
}

#[test]
fn test_override_reclassifies_current_measurement() {
    let roster = class_roster();
    let store = reference_store();
    let ana = roster.get("Ana").unwrap();

    let edited = ana.with_override(&StudentOverride {
        weight_kg: Some(15.0),
        ..Default::default()
    });
    let series = aggregate_with_config(&edited, &store, &EngineConfig::default());

    assert_eq!(
        series.latest().unwrap().result.status,
        NutritionalStatus::Normal
    );
    // Earlier occasions and the roster itself are untouched
    assert_eq!(
        series.results[0].result.status,
        NutritionalStatus::OverweightRisk
    );
    assert_eq!(ana.current().unwrap().weight_kg, Some(18.5));
}

#[test]
fn test_results_export_to_record_batch() {
    let roster = class_roster();
    let store = reference_store();
    let entries = classify_roster(&roster, &store, &EngineConfig::default());

    let rows = roster_rows(&entries);
    let batch = to_record_batch(&rows).unwrap();

    assert_eq!(batch.num_rows(), 2);
    let schema = batch.schema();
    assert!(schema.field_with_name("status").is_ok());
    assert!(schema.field_with_name("color").is_ok());
    assert_eq!(from_record_batch(&batch).unwrap(), rows);

    assert_eq!(rows[0].status, "Overweight");
    assert_eq!(rows[0].color, "darkorange");
    assert_eq!(rows[0].occasion_index, Some(2));

    let series = aggregate(roster.get("Ana").unwrap(), &store);
    let series_batch = to_record_batch(&series_rows(&series)).unwrap();
    assert_eq!(series_batch.num_rows(), 2);
}
