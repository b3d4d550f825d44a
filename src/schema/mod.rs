//! Schema normalization for uploaded sheets and reference datasets.

pub mod conversions;
pub mod field;
pub mod normalize;
pub mod synonyms;

pub use field::{CanonicalField, FieldKind};
pub use normalize::{
    CanonicalTable, map_headers, normalize, normalize_columns, normalize_with_config,
};
pub use synonyms::{SynonymRule, SynonymTable, fold_header};
