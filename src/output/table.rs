//! Summary table writer and reader (CSV).
//!
//! The table is written to a temporary file next to the destination and
//! renamed into place, so readers never observe a partial table.

use super::schema::{SummaryRow, SUMMARY_COLUMNS};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::Permissions;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write summary rows to a CSV file
///
/// **Public** - main entry point for the summary table
///
/// # Arguments
/// * `rows` - Rows to write, in the order given
/// * `output_path` - Destination; parent directories are created
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, directory, or uncreatable parent
/// * `OutputError::CsvFailed` / `WriteFailed` - serialization or I/O error
/// * `OutputError::PersistFailed` - rename into place failed
pub fn write_summary(rows: &[SummaryRow], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    validate_output_path(output_path)?;
    let dir = ensure_parent_dir(output_path)?;

    let temp = NamedTempFile::new_in(dir)?;
    // Temp files are created owner-only; the table keeps the mode it had
    if let Some(permissions) = target_permissions(output_path) {
        temp.as_file().set_permissions(permissions)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(temp);
    writer.write_record(SUMMARY_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let temp = writer
        .into_inner()
        .map_err(|e| OutputError::WriteFailed(e.into_error()))?;

    temp.as_file().sync_all()?;
    temp.persist(output_path)?;

    info!("Summary written ({} rows)", rows.len());

    Ok(())
}

/// Read a summary CSV back into rows
///
/// **Public** - used by `--append` and the validate command
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<Vec<SummaryRow>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let mut reader = csv::Reader::from_path(input_path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }

    Ok(rows)
}

/// Merge freshly computed rows into an existing table
///
/// Existing rows with a recomputed run id are replaced. The result is
/// sorted by run id.
pub fn merge_rows(existing: Vec<SummaryRow>, fresh: Vec<SummaryRow>) -> Vec<SummaryRow> {
    let mut merged: Vec<SummaryRow> = existing
        .into_iter()
        .filter(|old| !fresh.iter().any(|new| new.run_id == old.run_id))
        .collect();
    merged.extend(fresh);
    merged.sort_by(|a, b| a.run_id.cmp(&b.run_id));
    merged
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Mode the rewritten table should carry: the existing file's, else 0644
fn target_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

/// Create the parent directory if needed and return it
///
/// **Public** - shared with the JSON report writer
pub fn ensure_parent_dir(path: &Path) -> Result<&Path, OutputError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if !parent.exists() {
        debug!("Creating parent directories: {}", parent.display());
        std::fs::create_dir_all(parent).map_err(|e| {
            OutputError::InvalidPath(format!(
                "Cannot create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    Ok(parent)
}
