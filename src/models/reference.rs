//! WHO weight-for-height reference rows

use serde::Serialize;

use crate::schema::CanonicalField;

/// The seven z-score weight cut-offs of one reference row, in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZScoreThresholds {
    pub z_neg3: f64,
    pub z_neg2: f64,
    pub z_neg1: f64,
    pub z_0: f64,
    pub z_pos1: f64,
    pub z_pos2: f64,
    pub z_pos3: f64,
}

impl ZScoreThresholds {
    /// Build thresholds from values ordered -3 to +3
    #[must_use]
    pub const fn from_array(values: [f64; 7]) -> Self {
        Self {
            z_neg3: values[0],
            z_neg2: values[1],
            z_neg1: values[2],
            z_0: values[3],
            z_pos1: values[4],
            z_pos2: values[5],
            z_pos3: values[6],
        }
    }

    /// Values ordered -3 to +3
    #[must_use]
    pub const fn to_array(&self) -> [f64; 7] {
        [
            self.z_neg3,
            self.z_neg2,
            self.z_neg1,
            self.z_0,
            self.z_pos1,
            self.z_pos2,
            self.z_pos3,
        ]
    }

    /// Threshold for a z-score field; `None` for non z-score fields
    #[must_use]
    pub const fn get(&self, field: CanonicalField) -> Option<f64> {
        match field {
            CanonicalField::ZNeg3 => Some(self.z_neg3),
            CanonicalField::ZNeg2 => Some(self.z_neg2),
            CanonicalField::ZNeg1 => Some(self.z_neg1),
            CanonicalField::Z0 => Some(self.z_0),
            CanonicalField::ZPos1 => Some(self.z_pos1),
            CanonicalField::ZPos2 => Some(self.z_pos2),
            CanonicalField::ZPos3 => Some(self.z_pos3),
            _ => None,
        }
    }

    /// Whether the cut-offs never decrease from -3 to +3
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.to_array().windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// One immutable reference row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCurvePoint {
    pub gender: String,
    pub height_cm: f64,
    pub thresholds: ZScoreThresholds,
}

impl ReferenceCurvePoint {
    pub fn new(gender: impl Into<String>, height_cm: f64, thresholds: ZScoreThresholds) -> Self {
        Self {
            gender: gender.into(),
            height_cm,
            thresholds,
        }
    }
}
