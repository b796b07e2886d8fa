use crate::output::read_summary;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a summary CSV file
pub fn validate_summary_file(file_path: &Path) -> Result<usize> {
    println!("Validating summary: {}", file_path.display());

    let rows = read_summary(file_path)
        .with_context(|| format!("Not a valid summary table: {}", file_path.display()))?;

    let undefined_resource = rows.iter().filter(|r| r.resource_slope_per_hour.is_none()).count();
    let undefined_latency = rows.iter().filter(|r| r.p95_slope_per_hour.is_none()).count();

    println!("✓ Valid summary CSV");
    println!("  Runs: {}", rows.len());
    println!("  Runs without resource trend: {}", undefined_resource);
    println!("  Runs without latency trend: {}", undefined_latency);

    Ok(rows.len())
}

/// Display version information
pub fn display_version() {
    println!("aging-summary v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Robust trend summaries for long-running load tests.");
}
