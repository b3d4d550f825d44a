//! Per-student series and class-wide results
//!
//! Every classification call only reads the shared store, so students are
//! classified independently and may be fanned out on the rayon pool.

use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use smallvec::SmallVec;

use super::classifier::classify_measurement;
use crate::collections::Roster;
use crate::config::EngineConfig;
use crate::models::{ClassificationResult, Measurement, NutritionalStatus, StudentRecord};
use crate::registry::ReferenceStore;

/// Classification of one measurement occasion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OccasionResult {
    pub occasion_index: u32,
    pub measurement: Measurement,
    pub result: ClassificationResult,
}

/// A student's classified measurements in occasion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSeries {
    pub student_name: String,
    pub registration_id: Option<String>,
    pub gender: Option<String>,
    pub results: SmallVec<[OccasionResult; 4]>,
}

impl StudentSeries {
    /// Result of the most recent occasion
    #[must_use]
    pub fn latest(&self) -> Option<&OccasionResult> {
        self.results.last()
    }
}

/// Classify every measurement of a student, one result per occasion
///
/// Occasions with missing data are kept as `Insufficient Data`, so the
/// series is always as long as the student's measurement list.
#[must_use]
pub fn aggregate(student: &StudentRecord, store: &ReferenceStore) -> StudentSeries {
    aggregate_with_config(student, store, &EngineConfig::default())
}

/// Classify every measurement of a student with explicit configuration
#[must_use]
pub fn aggregate_with_config(
    student: &StudentRecord,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> StudentSeries {
    let gender = student.gender_code();
    let results = student
        .measurements
        .iter()
        .map(|measurement| OccasionResult {
            occasion_index: measurement.occasion_index,
            measurement: *measurement,
            result: classify_measurement(measurement, gender, store, config),
        })
        .collect();

    StudentSeries {
        student_name: student.student_name.clone(),
        registration_id: student.registration_id.clone(),
        gender: student.gender.clone(),
        results,
    }
}

/// Classification of a student's current measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub student_name: String,
    pub registration_id: Option<String>,
    pub gender: Option<String>,
    /// `None` when the student has no measurements
    pub measurement: Option<Measurement>,
    pub result: ClassificationResult,
}

/// Classify each student's current measurement, in roster order
///
/// The current measurement is the one with the latest occasion, which is not
/// necessarily the student's first row in the sheet.
#[must_use]
pub fn classify_roster(
    roster: &Roster,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> Vec<RosterEntry> {
    let classify_student = |student: &StudentRecord| classify_current(student, store, config);

    if config.parallel {
        roster.students().par_iter().map(classify_student).collect()
    } else {
        roster.students().iter().map(classify_student).collect()
    }
}

fn classify_current(
    student: &StudentRecord,
    store: &ReferenceStore,
    config: &EngineConfig,
) -> RosterEntry {
    let measurement = student.current().copied();
    let result = match &measurement {
        Some(m) => classify_measurement(m, student.gender_code(), store, config),
        None => ClassificationResult::sentinel(NutritionalStatus::InsufficientData, None),
    };

    RosterEntry {
        student_name: student.student_name.clone(),
        registration_id: student.registration_id.clone(),
        gender: student.gender.clone(),
        measurement,
        result,
    }
}

/// Number of students per status, in severity-rank order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDistribution {
    pub counts: Vec<(NutritionalStatus, usize)>,
}

impl ClassDistribution {
    /// Count statuses; every status is listed, including zero counts
    #[must_use]
    pub fn from_entries(entries: &[RosterEntry]) -> Self {
        Self::from_statuses(entries.iter().map(|entry| entry.result.status))
    }

    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = NutritionalStatus>) -> Self {
        let tally = statuses.into_iter().counts();
        let counts = NutritionalStatus::ALL
            .into_iter()
            .map(|status| (status, tally.get(&status).copied().unwrap_or(0)))
            .collect();
        Self { counts }
    }

    #[must_use]
    pub fn count(&self, status: NutritionalStatus) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}
