//! JSON report writer.
//!
//! Writes a `SummaryReport` (rows plus the settings that produced them).

use super::schema::{SummaryReport, SummaryRow};
use super::table::ensure_parent_dir;
use crate::utils::config::{AnalysisConfig, SCHEMA_VERSION};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Build a report stamped with the current time
///
/// **Public** - used by the summarize command
pub fn build_report(test_root: &Path, config: &AnalysisConfig, rows: &[SummaryRow]) -> SummaryReport {
    SummaryReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        test_root: test_root.display().to_string(),
        config: config.clone(),
        rows: rows.to_vec(),
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &SummaryReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());

    if output_path.as_os_str().is_empty() || output_path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Not a file path: {}",
            output_path.display()
        )));
    }
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    debug!("Report written with {} rows", report.rows.len());

    Ok(())
}
