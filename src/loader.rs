//! CSV loading for the command-line tool
//!
//! Reads a sheet into a single Arrow table whose columns are all `Utf8`, so
//! every type decision is left to the normalizer. Short rows are padded with
//! nulls and rows with more fields than the header are skipped with a warning.

use anyhow::{Context, bail};
use arrow::array::{Array, StringArray};
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use crate::utils::logging::{log_table_summary, log_warning};

/// Read a CSV file with a header row into one all-`Utf8` record batch
///
/// Invalid UTF-8 is replaced rather than rejected, since spreadsheet exports
/// are often Latin-1.
pub fn read_csv_table(path: &Path) -> anyhow::Result<RecordBatch> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    read_csv_text(&text, &path.display().to_string())
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse CSV text with a header row into one all-`Utf8` record batch
///
/// The delimiter is `;` when the header line holds more semicolons than
/// commas (common for sheets exported with decimal commas), `,` otherwise.
pub fn read_csv_text(text: &str, source: &str) -> anyhow::Result<RecordBatch> {
    let text = text.trim_start_matches('\u{feff}');
    let delimiter = detect_delimiter(text);
    let records = split_records(text, delimiter);
    let Some(&(_, width)) = records.first() else {
        bail!("{source} is empty");
    };

    let mut kept = String::with_capacity(text.len());
    let mut skipped = 0;
    for (record, fields) in &records {
        if *fields > width {
            skipped += 1;
        } else {
            kept.push_str(record);
        }
    }
    if skipped > 0 {
        log_warning(
            &format!("Skipped {skipped} rows with more fields than the header"),
            Some(source),
        );
    }

    // The header is parsed as an ordinary first row; names are taken from it below
    let placeholder = Arc::new(Schema::new(
        (0..width)
            .map(|idx| Field::new(format!("column_{idx}"), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let reader = ReaderBuilder::new(placeholder.clone())
        .with_header(false)
        .with_delimiter(delimiter)
        .with_truncated_rows(true)
        .build(Cursor::new(kept.as_bytes()))?;

    let mut batches = Vec::new();
    for batch_result in reader {
        match batch_result {
            Ok(batch) => batches.push(batch),
            Err(e) => {
                // The reader repeats the same error forever once it fails
                log_warning(&format!("Stopped at unreadable rows ({e})"), Some(source));
                break;
            }
        }
    }

    let raw = concat_batches(&placeholder, &batches)?;
    if raw.num_rows() == 0 {
        bail!("{source} has no header row");
    }

    let fields: Vec<Field> = raw
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            Field::new(header_name(column.as_ref(), idx), DataType::Utf8, true)
        })
        .collect();
    let body = raw.slice(1, raw.num_rows() - 1);
    let table = RecordBatch::try_new(Arc::new(Schema::new(fields)), body.columns().to_vec())?;

    log_table_summary(source, &table);
    Ok(table)
}

fn header_name(column: &dyn Array, idx: usize) -> String {
    column
        .as_any()
        .downcast_ref::<StringArray>()
        .filter(|cells| cells.is_valid(0))
        .map(|cells| cells.value(0).trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("column_{idx}"))
}

fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// Split CSV text into raw records with their field counts
///
/// Delimiters and line breaks inside double quotes belong to the field.
/// Each record keeps its line terminator.
fn split_records(text: &str, delimiter: u8) -> Vec<(&str, usize)> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut fields = 1;
    let mut quoted = false;

    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            b'"' => quoted = !quoted,
            b'\n' if !quoted => {
                records.push((&text[start..=idx], fields));
                start = idx + 1;
                fields = 1;
            }
            b if b == delimiter && !quoted => fields += 1,
            _ => {}
        }
    }
    if start < text.len() {
        records.push((&text[start..], fields));
    }
    records
}
