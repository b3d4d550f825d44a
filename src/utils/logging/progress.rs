//! Progress reporting for batch classification runs

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for the sheet progress bar
pub const DEFAULT_SHEET_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} sheets {msg}";

/// Create a progress bar counting classified sheets
///
/// # Arguments
/// * `length` - Number of sheets
/// * `description` - Optional description to display as the initial message
#[must_use]
pub fn create_sheet_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_SHEET_TEMPLATE)
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with a closing message
pub fn finish_progress_bar(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(message.to_string());
}
