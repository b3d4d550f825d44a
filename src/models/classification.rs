//! Nutritional status vocabulary and classification results

use serde::Serialize;
use std::fmt;

/// Nutritional status of one measurement
///
/// The first six variants are clinical categories in ascending weight order.
/// The last two are sentinels: the ladder could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NutritionalStatus {
    #[serde(rename = "Severe thinness")]
    SevereThinness,
    #[serde(rename = "Thinness")]
    Thinness,
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Overweight risk")]
    OverweightRisk,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity")]
    Obesity,
    /// Weight or height missing or not positive
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
    /// No reference curve for the gender
    #[serde(rename = "Calculation Error")]
    CalculationError,
}

impl NutritionalStatus {
    /// Every status in severity-rank order
    pub const ALL: [Self; 8] = [
        Self::SevereThinness,
        Self::Thinness,
        Self::Normal,
        Self::OverweightRisk,
        Self::Overweight,
        Self::Obesity,
        Self::InsufficientData,
        Self::CalculationError,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SevereThinness => "Severe thinness",
            Self::Thinness => "Thinness",
            Self::Normal => "Normal",
            Self::OverweightRisk => "Overweight risk",
            Self::Overweight => "Overweight",
            Self::Obesity => "Obesity",
            Self::InsufficientData => "Insufficient Data",
            Self::CalculationError => "Calculation Error",
        }
    }

    /// Display color for presentation layers
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::SevereThinness => "darkred",
            Self::Thinness => "orangered",
            Self::Normal => "green",
            Self::OverweightRisk => "gold",
            Self::Overweight => "darkorange",
            Self::Obesity => "red",
            Self::InsufficientData | Self::CalculationError => "gray",
        }
    }

    /// Position used to order statuses consistently; sentinels sort last
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::InsufficientData | Self::CalculationError)
    }

    /// Look up a status by its label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl fmt::Display for NutritionalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub status: NutritionalStatus,
    /// Body-mass index, present whenever weight and height are both positive
    pub bmi: Option<f64>,
    /// Height of the reference row the ladder was evaluated against
    pub reference_height_cm: Option<f64>,
}

impl ClassificationResult {
    #[must_use]
    pub const fn sentinel(status: NutritionalStatus, bmi: Option<f64>) -> Self {
        Self {
            status,
            bmi,
            reference_height_cm: None,
        }
    }

    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.status.color()
    }

    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.status.rank()
    }
}

/// Body-mass index `weight / (height_m)^2`, rounded to `decimals`
///
/// Returns `None` unless both inputs are present, finite and positive.
#[must_use]
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>, decimals: u32) -> Option<f64> {
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let height = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
    let height_m = height / 100.0;
    Some(round_to(weight / (height_m * height_m), decimals))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
