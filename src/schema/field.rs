//! Canonical field vocabulary
//!
//! Every column of a normalized table is one of these fields, whatever the
//! spelling, language or accents of the header it came from.

use arrow::datatypes::{DataType, Field};
use serde::Serialize;
use std::fmt;

/// Recognized semantic columns
///
/// The declaration order is the column order of a canonical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    StudentName,
    RegistrationId,
    Age,
    Gender,
    WeightKg,
    HeightCm,
    Occasion,
    ZNeg3,
    ZNeg2,
    ZNeg1,
    Z0,
    ZPos1,
    ZPos2,
    ZPos3,
}

/// How the values of a canonical field are materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed free text
    Text,
    /// Trimmed, upper-cased code (`M`/`F`)
    Code,
    /// Nullable floating point, comma accepted as decimal separator
    Numeric,
}

impl CanonicalField {
    /// All fields in canonical column order
    pub const ALL: [Self; 14] = [
        Self::StudentName,
        Self::RegistrationId,
        Self::Age,
        Self::Gender,
        Self::WeightKg,
        Self::HeightCm,
        Self::Occasion,
        Self::ZNeg3,
        Self::ZNeg2,
        Self::ZNeg1,
        Self::Z0,
        Self::ZPos1,
        Self::ZPos2,
        Self::ZPos3,
    ];

    /// The seven z-score threshold fields, from -3 to +3
    pub const Z_SCORES: [Self; 7] = [
        Self::ZNeg3,
        Self::ZNeg2,
        Self::ZNeg1,
        Self::Z0,
        Self::ZPos1,
        Self::ZPos2,
        Self::ZPos3,
    ];

    /// Column name used in canonical tables
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StudentName => "student_name",
            Self::RegistrationId => "registration_id",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::WeightKg => "weight_kg",
            Self::HeightCm => "height_cm",
            Self::Occasion => "occasion",
            Self::ZNeg3 => "z_neg3",
            Self::ZNeg2 => "z_neg2",
            Self::ZNeg1 => "z_neg1",
            Self::Z0 => "z_0",
            Self::ZPos1 => "z_pos1",
            Self::ZPos2 => "z_pos2",
            Self::ZPos3 => "z_pos3",
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::StudentName | Self::RegistrationId | Self::Age => FieldKind::Text,
            Self::Gender => FieldKind::Code,
            _ => FieldKind::Numeric,
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self.kind(), FieldKind::Numeric)
    }

    /// Arrow data type of the canonical column
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self.kind() {
            FieldKind::Text | FieldKind::Code => DataType::Utf8,
            FieldKind::Numeric => DataType::Float64,
        }
    }

    /// Arrow field of the canonical column (always nullable)
    #[must_use]
    pub fn arrow_field(self) -> Field {
        Field::new(self.name(), self.data_type(), true)
    }

    /// Look up a field by its canonical column name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
