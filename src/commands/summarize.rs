//! Summarize command implementation.
//!
//! The summarize command:
//! 1. Validates settings and the test root
//! 2. Discovers runs
//! 3. Computes resource and latency metrics per run
//! 4. Writes the summary table (and optional JSON report)
//! 5. Prints the table

use super::discover::{discover_runs, RunArtifacts};
use super::models::SummarizeArgs;
use crate::metrics::{compute_latency_metrics, compute_resource_metrics, LatencyMetrics, ResourceMetrics};
use crate::output::{
    build_report, format_summary_table, merge_rows, read_summary, write_report, write_summary,
    SummaryRow,
};
use crate::utils::config::AnalysisConfig;
use crate::utils::error::{ConfigError, RunError};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Both metric sets for one run, each independently fallible
#[derive(Debug)]
pub struct RunOutcome {
    pub run: RunArtifacts,
    pub resource: Result<ResourceMetrics, RunError>,
    pub latency: Result<LatencyMetrics, RunError>,
}

impl RunOutcome {
    /// Collapse into a summary row; failed sides become empty cells
    pub fn to_row(&self) -> SummaryRow {
        let resource = self.resource.as_ref().copied().unwrap_or_default();
        SummaryRow::new(&self.run.run_id, &resource, self.latency.as_ref().ok())
    }
}

/// Compute both metric sets for a run
///
/// **Public** - per-run data errors are captured, never propagated
pub fn evaluate_run(run: &RunArtifacts, config: &AnalysisConfig) -> RunOutcome {
    let resource = compute_resource_metrics(&run.monitor_path, config);
    if let Err(e) = &resource {
        warn!("{}: resource metrics unavailable: {}", run.run_id, e);
    }

    let latency = compute_latency_metrics(&run.request_log_path, config);
    if let Err(e) = &latency {
        warn!("{}: latency metrics unavailable: {}", run.run_id, e);
    }

    RunOutcome {
        run: run.clone(),
        resource,
        latency,
    }
}

/// Execute the summarize command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The rows written (after merging, when appending)
///
/// # Errors
/// * Invalid settings or test root
/// * No runs discovered
/// * Output write failures
pub fn execute_summarize(args: SummarizeArgs) -> Result<Vec<SummaryRow>> {
    let start_time = Instant::now();

    validate_args(&args)?;

    info!("Step 1/3: Discovering runs under {}", args.test_root.display());
    let runs = discover_runs(&args.test_root)?;
    if runs.is_empty() {
        anyhow::bail!(
            "No runs discovered under {}. Expected <root>/<run>/Output/monitor_results.csv and jmeter_results.jtl",
            args.test_root.display()
        );
    }
    info!("Found {} runs", runs.len());

    info!("Step 2/3: Computing trend metrics...");
    let mut rows: Vec<SummaryRow> = runs
        .iter()
        .map(|run| {
            debug!("Analyzing run {}", run.run_id);
            evaluate_run(run, &args.config).to_row()
        })
        .collect();
    rows.sort_by(|a, b| a.run_id.cmp(&b.run_id));

    info!("Step 3/3: Writing outputs...");
    if args.append && args.output_csv.is_file() {
        let existing = read_summary(&args.output_csv).with_context(|| {
            format!(
                "Failed to read existing summary {} for --append",
                args.output_csv.display()
            )
        })?;
        debug!("Merging into {} existing rows", existing.len());
        rows = merge_rows(existing, rows);
    }

    write_summary(&rows, &args.output_csv).context("Failed to write summary CSV")?;
    info!("✓ Summary written to: {}", args.output_csv.display());

    if let Some(json_path) = &args.output_json {
        let report = build_report(&args.test_root, &args.config, &rows);
        write_report(&report, json_path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    if args.print_table {
        println!("{}", format_summary_table(&rows));
    }

    let elapsed = start_time.elapsed();
    info!("Summarize completed in {:.2}s", elapsed.as_secs_f64());

    Ok(rows)
}

/// Validate summarize arguments
///
/// **Public** - can be called before execute_summarize for early validation
pub fn validate_args(args: &SummarizeArgs) -> Result<()> {
    args.config.validate()?;

    if !args.test_root.is_dir() {
        return Err(ConfigError::InvalidRoot(args.test_root.clone()).into());
    }

    if args.output_csv.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    Ok(())
}
