//! Algorithm implementations
//!
//! Growth classification against WHO weight-for-height reference curves.

pub mod growth;
