//! WHO reference curve store
//!
//! Holds one ascending-by-height curve per gender. A store is built once from
//! a raw reference table and never mutated; reloading builds a new store.

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{ReferenceCurvePoint, ZScoreThresholds};
use crate::schema::{CanonicalField, CanonicalTable, SynonymTable, normalize_columns};
use crate::utils::arrow::{extract_f64, extract_text, extract_z_scores};

/// Immutable reference curves partitioned by gender
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceStore {
    curves: FxHashMap<String, Vec<ReferenceCurvePoint>>,
}

impl ReferenceStore {
    /// Load a store from a raw reference table using the default synonyms
    pub fn load(raw: &RecordBatch) -> Result<Self> {
        Self::load_with(raw, &SynonymTable::default(), &EngineConfig::default())
    }

    /// Load a store from a raw reference table
    ///
    /// The table goes through the same normalizer as student sheets. Rows
    /// with a missing gender, a non-positive or unparseable height, any
    /// unparseable threshold, or decreasing thresholds are excluded.
    pub fn load_with(
        raw: &RecordBatch,
        synonyms: &SynonymTable,
        config: &EngineConfig,
    ) -> Result<Self> {
        let table = normalize_columns(raw, synonyms, config)?;
        let (store, excluded) = Self::from_table(&table)?;

        if excluded > 0 {
            warn!("Excluded {excluded} unusable reference rows");
        }
        info!(
            "Loaded {} reference points for genders {:?}",
            store.len(),
            store.genders()
        );
        Ok(store)
    }

    /// Build a store from an already normalized table
    ///
    /// Returns the store and the number of excluded rows.
    pub fn from_table(table: &CanonicalTable) -> Result<(Self, usize)> {
        let mut points = Vec::with_capacity(table.num_rows());
        let mut excluded = 0;

        for row in 0..table.num_rows() {
            match read_point(table, row)? {
                Some(point) => points.push(point),
                None => excluded += 1,
            }
        }

        Ok((Self::from_points(points), excluded))
    }

    /// Build a store from points in any order
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = ReferenceCurvePoint>) -> Self {
        let mut curves: FxHashMap<String, Vec<ReferenceCurvePoint>> = FxHashMap::default();
        for point in points {
            curves.entry(point.gender.clone()).or_default().push(point);
        }
        for curve in curves.values_mut() {
            // Stable, so equal heights keep their input order
            curve.sort_by(|a, b| a.height_cm.total_cmp(&b.height_cm));
        }
        Self { curves }
    }

    /// Ascending curve for a gender; empty when the gender is unknown
    #[must_use]
    pub fn curve_for(&self, gender: &str) -> &[ReferenceCurvePoint] {
        self.curves
            .get(gender)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Loaded gender codes, sorted
    #[must_use]
    pub fn genders(&self) -> Vec<&str> {
        self.curves.keys().map(String::as_str).sorted().collect()
    }

    /// Total number of reference points
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(height_cm, threshold)` pairs of one z-score line, for drawing curves
    ///
    /// Empty for an unknown gender or a field that is not a z-score.
    #[must_use]
    pub fn series(&self, gender: &str, line: CanonicalField) -> Vec<(f64, f64)> {
        self.curve_for(gender)
            .iter()
            .filter_map(|point| {
                point
                    .thresholds
                    .get(line)
                    .map(|threshold| (point.height_cm, threshold))
            })
            .collect()
    }
}

fn read_point(table: &CanonicalTable, row: usize) -> Result<Option<ReferenceCurvePoint>> {
    let Some(gender) = extract_text(table, row, CanonicalField::Gender, false)? else {
        return Ok(None);
    };
    let Some(height_cm) = extract_f64(table, row, CanonicalField::HeightCm, false)? else {
        return Ok(None);
    };
    if height_cm <= 0.0 {
        return Ok(None);
    }
    let Some(values) = extract_z_scores(table, row)? else {
        return Ok(None);
    };

    let thresholds = ZScoreThresholds::from_array(values);
    if !thresholds.is_monotonic() {
        warn!("Reference row {row} ({gender}, {height_cm} cm) has decreasing thresholds");
        return Ok(None);
    }
    Ok(Some(ReferenceCurvePoint::new(gender, height_cm, thresholds)))
}
