//! Shared helpers for Arrow access and logging.

pub mod arrow;
pub mod logging;
