//! Helpers for rendering the console progress report

use crate::preview::truncate;
use crate::record::BatchRecord;
use std::path::Path;

/// Title printed once before any batch
pub const TITLE: &str = "MedChain QR Code Generator";

/// Lines printed before the first batch.
pub fn banner() -> Vec<String> {
    vec![TITLE.to_string(), "=".repeat(40)]
}

/// Lines announcing a batch, printed before it is encoded.
pub fn header_lines(record: &BatchRecord) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "{} ({}) - {}",
            record.drug_name,
            record.batch_number,
            record.status_label()
        ),
        "-".repeat(30),
    ]
}

/// Lines describing the preview; the data URI is cut to `preview_chars` characters.
///
/// `Status:` always reflects the counterfeit flag, whatever label the record carries.
pub fn preview_lines(
    record: &BatchRecord,
    preview_uri: &str,
    preview_chars: usize,
) -> Vec<String> {
    vec![
        format!("QR Code (Base64): {}", truncate(preview_uri, preview_chars)),
        format!("Batch Number: {}", record.batch_number),
        format!("Status: {}", record.status()),
    ]
}

/// Line reporting the saved file by name.
pub fn saved_line(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Saved: {name}")
}
