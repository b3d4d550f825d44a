//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use arrow::record_batch::RecordBatch;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `source` - Name of the sheet or dataset being operated on
pub fn log_operation_start(operation: &str, source: &str) {
    log::info!("{operation} {source}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `source` - Name of the sheet or dataset that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    source: &str,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} items from {source} in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} items from {source}");
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `source` - Optional sheet or dataset related to the warning
pub fn log_warning(message: &str, source: Option<&str>) {
    if let Some(source) = source {
        log::warn!("{message}: {source}");
    } else {
        log::warn!("{message}");
    }
}

/// Log row/column counts and the schema of a table at debug level
pub fn log_table_summary(source: &str, batch: &RecordBatch) {
    log::debug!(
        "{source}: {} rows, {} columns",
        batch.num_rows(),
        batch.num_columns()
    );
    for field in batch.schema().fields() {
        log::debug!("  - {} ({})", field.name(), field.data_type());
    }
}
