//! Fixtures for sample data generation and placement.
//!
//! Provides:
//! - Sample error-count, explanation and readiness documents
//! - Helpers to write them (or documents built from records) to disk

use anyhow::{Context, Result};
use errview_sources::ErrorCounts;
use errview_types::ErrorRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Two steps of one workflow at one site; 8 errors in total.
pub const WORKED_EXAMPLE: &str = r#"{
  "/A/Step1": {"8020": {"T2_US_X": 5}},
  "/A/Step2": {"8020": {"T2_US_X": 3}}
}"#;

/// Three workflows over three sites and three error codes; 29 errors in total.
pub const MULTI_WORKFLOW: &str = r#"{
  "/A/Step1": {"8020": {"T2_US_X": 5, "T1_DE_Y": 2}, "134": {"T2_US_X": 1}},
  "/A/Step2": {"8020": {"T2_US_X": 3}},
  "/B/Merge": {"134": {"T1_DE_Y": 4}, "-1": {"T2_CH_Z": 6}},
  "/C_ACDC0/Step1": {"8020": {"T2_CH_Z": 0}, "134": {"T2_US_X": 8}}
}"#;

/// Explanations for the codes used in `MULTI_WORKFLOW`.
pub const EXPLANATIONS: &str = r#"{
  "8020": ["Fatal Exception: FileOpenError", "Unable to open file"],
  "134": ["Segmentation fault"]
}"#;

/// Readiness classes for the sites used in `MULTI_WORKFLOW`.
pub const READINESS: &str = r#"{
  "T2_US_X": "green",
  "T1_DE_Y": "yellow",
  "T2_CH_Z": "red"
}"#;

/// Write `body` to `dir/name`, creating parent directories when needed.
pub fn write_source(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Serialize records into the nested `step -> errorcode -> site -> count`
/// document. Repeated cells are summed.
pub fn counts_document<'a>(records: impl IntoIterator<Item = &'a ErrorRecord>) -> Result<String> {
    Ok(ErrorCounts::from_records(records).to_json()?)
}
