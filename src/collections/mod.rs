//! Collections of students
//!
//! A [`Roster`] holds the students of one class sheet, keyed by name and kept
//! in the order they first appear in the sheet.

pub mod roster;

pub use roster::Roster;
