//! Drug batch records rendered into QR fixtures

use crate::error::{Error, Result};
use crate::writer::output_file_name;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Status label printed for counterfeit batches when none is given
pub const COUNTERFEIT_LABEL: &str = "COUNTERFEIT";
/// Status label printed for genuine batches when none is given
pub const GENUINE_LABEL: &str = "GENUINE";

/// A single batch to render
///
/// Only `batch_number` ends up inside the QR code. `drug_name` and the
/// status label are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Batch identifier, e.g. `EPI-2024-001`
    pub batch_number: String,
    /// Selects the red (counterfeit) or green (genuine) colour scheme
    #[serde(default)]
    pub is_counterfeit: bool,
    /// Human-readable drug name
    pub drug_name: String,
    /// Optional override of the printed status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
}

impl BatchRecord {
    /// Create a record whose status label is derived from `is_counterfeit`.
    pub fn new(
        batch_number: impl Into<String>,
        is_counterfeit: bool,
        drug_name: impl Into<String>,
    ) -> Self {
        Self {
            batch_number: batch_number.into(),
            is_counterfeit,
            drug_name: drug_name.into(),
            status_label: None,
        }
    }

    /// Status implied by the counterfeit flag
    pub fn status(&self) -> &'static str {
        if self.is_counterfeit {
            COUNTERFEIT_LABEL
        } else {
            GENUINE_LABEL
        }
    }

    /// Label shown in the batch header; falls back to [`status`](Self::status)
    pub fn status_label(&self) -> &str {
        self.status_label.as_deref().unwrap_or_else(|| self.status())
    }

    /// Name of the PNG saved for this batch
    pub fn file_name(&self) -> String {
        output_file_name(&self.batch_number)
    }
}

/// The five demo batches, in the order they are generated.
pub fn sample_records() -> Vec<BatchRecord> {
    vec![
        BatchRecord::new("EPI-2024-001", true, "Epinephrine"),
        BatchRecord::new("INS-2024-026", false, "Insulin"),
        BatchRecord::new("MOR-2024-041", false, "Morphine"),
        BatchRecord::new("DIG-2024-051", false, "Digoxin"),
        BatchRecord::new("ATR-2024-015", false, "Atropine"),
    ]
}

#[derive(Deserialize)]
struct RecordFile {
    records: Vec<BatchRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YamlRecords {
    List(Vec<BatchRecord>),
    Table(RecordFile),
}

/// Read batch records from a JSON, TOML or YAML file.
///
/// JSON expects a top-level array. TOML expects `[[records]]` tables. YAML
/// accepts either a bare list or a `records:` key.
pub fn load_records(path: &Path) -> Result<Vec<BatchRecord>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Records(format!("Failed to read {}: {e}", path.display())))?;

    let records = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
        .as_str()
    {
        "json" => serde_json::from_str::<Vec<BatchRecord>>(&contents).map_err(|e| {
            Error::Records(format!("Failed to parse JSON {}: {e}", path.display()))
        })?,
        "toml" => toml::from_str::<RecordFile>(&contents)
            .map(|file| file.records)
            .map_err(|e| {
                Error::Records(format!("Failed to parse TOML {}: {e}", path.display()))
            })?,
        "yaml" | "yml" => match serde_yaml::from_str::<YamlRecords>(&contents) {
            Ok(YamlRecords::List(records)) => records,
            Ok(YamlRecords::Table(file)) => file.records,
            Err(e) => {
                return Err(Error::Records(format!(
                    "Failed to parse YAML {}: {e}",
                    path.display()
                )));
            }
        },
        other => {
            return Err(Error::Records(format!(
                "Unsupported record format '{}', expected json/toml/yaml",
                other
            )));
        }
    };

    tracing::debug!(count = records.len(), path = %path.display(), "Loaded batch records");
    Ok(records)
}
