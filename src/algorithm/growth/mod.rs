//! Weight-for-height growth classification
//!
//! Resolves the reference row nearest in height, applies the z-score ladder
//! and aggregates results per student and per class.

pub mod aggregate;
pub mod classifier;
pub mod resolver;

pub use aggregate::{
    ClassDistribution, OccasionResult, RosterEntry, StudentSeries, aggregate,
    aggregate_with_config, classify_roster,
};
pub use classifier::{classify, classify_measurement, classify_with_config, status_for_weight};
pub use resolver::resolve;
