//! Class roster built from a normalized sheet
//!
//! Rows are grouped by student name in first-appearance order. Each row
//! contributes one measurement; duplicate rows of the same name are the
//! student's successive occasions.

use log::warn;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Measurement, StudentRecord};
use crate::schema::{CanonicalField, CanonicalTable};
use crate::utils::arrow::{extract_f64, extract_text};

/// Students of one class sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    students: Vec<StudentRecord>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the rows of a canonical table into students
    ///
    /// Fails with a schema error if the table has no `student_name` column.
    /// Identity fields take the first non-missing value among a student's
    /// rows. The occasion of a row is its `occasion` value when present and
    /// otherwise its 1-based position among the student's rows.
    pub fn from_table(table: &CanonicalTable) -> Result<Self> {
        table.require(CanonicalField::StudentName)?;

        let mut roster = Self::new();
        let mut row_counts: FxHashMap<usize, u32> = FxHashMap::default();
        let mut skipped = 0;

        for row in 0..table.num_rows() {
            let Some(name) = extract_text(table, row, CanonicalField::StudentName, true)? else {
                skipped += 1;
                continue;
            };

            let idx = roster.entry(&name);
            let ordinal = row_counts.entry(idx).or_insert(0);
            *ordinal += 1;

            let occasion = extract_f64(table, row, CanonicalField::Occasion, false)?
                .and_then(occasion_index)
                .unwrap_or(*ordinal);
            let measurement = Measurement::new(
                occasion,
                extract_f64(table, row, CanonicalField::WeightKg, false)?,
                extract_f64(table, row, CanonicalField::HeightCm, false)?,
            );

            let registration_id = extract_text(table, row, CanonicalField::RegistrationId, false)?;
            let age = extract_text(table, row, CanonicalField::Age, false)?;
            let gender = extract_text(table, row, CanonicalField::Gender, false)?;

            let student = &mut roster.students[idx];
            student.registration_id = student.registration_id.take().or(registration_id);
            student.age = student.age.take().or(age);
            student.gender = student.gender.take().or(gender);
            student.push_measurement(measurement);
        }

        if skipped > 0 {
            warn!("Skipped {skipped} rows without a student name");
        }
        Ok(roster)
    }

    /// Add a student, replacing any student of the same name
    pub fn insert(&mut self, student: StudentRecord) {
        match self.index.get(&student.student_name) {
            Some(&idx) => self.students[idx] = student,
            None => {
                self.index
                    .insert(student.student_name.clone(), self.students.len());
                self.students.push(student);
            }
        }
    }

    #[must_use]
    pub fn get(&self, student_name: &str) -> Option<&StudentRecord> {
        self.index.get(student_name).map(|&idx| &self.students[idx])
    }

    /// Students in first-appearance order
    #[must_use]
    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    /// Student names in first-appearance order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.students
            .iter()
            .map(|s| s.student_name.as_str())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn entry(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        self.insert(StudentRecord::new(name));
        self.students.len() - 1
    }
}

fn occasion_index(value: f64) -> Option<u32> {
    let rounded = value.round();
    (rounded >= 0.0 && rounded <= f64::from(u32::MAX)).then_some(rounded as u32)
}
