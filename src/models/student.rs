//! Student and measurement models
//!
//! A student is identified by name within one class sheet and carries one
//! measurement per occasion (usually a school quarter).

use serde::Serialize;
use smallvec::SmallVec;

/// Weight and height taken at one occasion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Occasion number, e.g. quarter 1-4
    pub occasion_index: u32,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

impl Measurement {
    #[must_use]
    pub const fn new(occasion_index: u32, weight_kg: Option<f64>, height_cm: Option<f64>) -> Self {
        Self {
            occasion_index,
            weight_kg,
            height_cm,
        }
    }
}

/// A student and the measurements taken for them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub student_name: String,
    pub registration_id: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    /// Ordered by occasion
    pub measurements: SmallVec<[Measurement; 4]>,
}

impl StudentRecord {
    #[must_use]
    pub fn new(student_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            registration_id: None,
            age: None,
            gender: None,
            measurements: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    #[must_use]
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.push_measurement(measurement);
        self
    }

    /// Insert a measurement keeping occasion order (stable for equal occasions)
    pub fn push_measurement(&mut self, measurement: Measurement) {
        let idx = self
            .measurements
            .partition_point(|m| m.occasion_index <= measurement.occasion_index);
        self.measurements.insert(idx, measurement);
    }

    /// The most recent measurement
    #[must_use]
    pub fn current(&self) -> Option<&Measurement> {
        self.measurements.last()
    }

    /// Gender code used to pick a reference curve; empty when unknown
    #[must_use]
    pub fn gender_code(&self) -> &str {
        self.gender.as_deref().unwrap_or("")
    }

    /// Apply operator corrections to the current measurement and identity
    ///
    /// A student without measurements gains one (occasion 1) when the
    /// override carries weight or height.
    #[must_use]
    pub fn with_override(&self, changes: &StudentOverride) -> Self {
        let mut updated = self.clone();
        if let Some(gender) = &changes.gender {
            updated.gender = Some(gender.trim().to_uppercase());
        }
        if let Some(age) = &changes.age {
            updated.age = Some(age.clone());
        }
        if changes.weight_kg.is_none() && changes.height_cm.is_none() {
            return updated;
        }
        match updated.measurements.last_mut() {
            Some(current) => {
                if changes.weight_kg.is_some() {
                    current.weight_kg = changes.weight_kg;
                }
                if changes.height_cm.is_some() {
                    current.height_cm = changes.height_cm;
                }
            }
            None => updated
                .measurements
                .push(Measurement::new(1, changes.weight_kg, changes.height_cm)),
        }
        updated
    }
}

/// Corrections entered by an operator before re-classifying a student
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentOverride {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Option<String>,
    pub age: Option<String>,
}
