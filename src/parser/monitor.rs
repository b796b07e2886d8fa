//! Loader for the resource monitor table (`monitor_results.csv`).
//!
//! Expected columns:
//!   timestamp (epoch ms), memory_mib (float),
//!   scope (container/project), container_name ('ALL' for project rows)
//! Other columns (cpu_percent, timestamp_local, ...) are ignored.

use super::coerce::{parse_f64_or_missing, parse_i64_or_missing, parse_text};
use super::schema::{ResourceSample, ResourceTable};
use crate::utils::config::{
    COMPONENT_FIELD_NAMES, SCOPE_FIELD_NAME, TIMESTAMP_FIELD_NAMES, USAGE_FIELD_NAMES,
};
use crate::utils::error::LoadError;
use log::{debug, warn};
use std::path::Path;

/// Load a monitor CSV and sort it by timestamp
///
/// **Public** - main entry point for resource samples
///
/// # Errors
/// * `LoadError::Io` - file cannot be read
/// * `LoadError::MissingColumn` - no timestamp or usage column
/// * `LoadError::Csv` - header row is unreadable
pub fn load_resource_table(path: impl AsRef<Path>) -> Result<ResourceTable, LoadError> {
    let path = path.as_ref();
    debug!("Reading monitor table: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_resource_csv(&content, path)
}

/// Parse monitor CSV text
///
/// **Public** - `origin` is only used in error messages
pub fn parse_resource_csv(content: &str, origin: &Path) -> Result<ResourceTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();

    let ts_idx = column_index(&headers, TIMESTAMP_FIELD_NAMES).ok_or_else(|| LoadError::MissingColumn {
        path: origin.to_path_buf(),
        column: TIMESTAMP_FIELD_NAMES[0].to_string(),
    })?;
    let usage_idx = column_index(&headers, USAGE_FIELD_NAMES).ok_or_else(|| LoadError::MissingColumn {
        path: origin.to_path_buf(),
        column: USAGE_FIELD_NAMES[0].to_string(),
    })?;
    let scope_idx = column_index(&headers, &[SCOPE_FIELD_NAME]);
    let component_idx = column_index(&headers, COMPONENT_FIELD_NAMES);

    let mut samples = Vec::new();
    let mut dropped = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable monitor row {}: {}", line + 1, e);
                dropped += 1;
                continue;
            }
        };

        let Some(timestamp_ms) = parse_i64_or_missing(record.get(ts_idx)) else {
            dropped += 1;
            continue;
        };

        samples.push(ResourceSample {
            timestamp_ms,
            scope: scope_idx.and_then(|i| parse_text(record.get(i))),
            component: component_idx.and_then(|i| parse_text(record.get(i))),
            usage: parse_f64_or_missing(record.get(usage_idx)),
        });
    }

    if dropped > 0 {
        debug!("Dropped {} monitor rows without a usable timestamp", dropped);
    }

    // Stable: rows sharing a timestamp keep file order
    samples.sort_by_key(|s| s.timestamp_ms);

    Ok(ResourceTable {
        samples,
        has_scope: scope_idx.is_some(),
        has_component: component_idx.is_some(),
    })
}

/// Position of the first header matching any of `names`
///
/// **Public** - shared with the request-log loader
pub fn column_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
}
