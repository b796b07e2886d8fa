//! Inspect command: one run, with the diagnostics the summary table hides.

use super::discover::RunArtifacts;
use super::models::InspectArgs;
use super::summarize::{evaluate_run, RunOutcome};
use anyhow::Result;
use log::info;

fn show(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.6}", v))
}

/// Render an outcome as indented text
pub fn describe_outcome(outcome: &RunOutcome) -> String {
    let mut lines = vec![format!("Run: {}", outcome.run.run_id)];

    lines.push(format!("  Monitor: {}", outcome.run.monitor_path.display()));
    match &outcome.resource {
        Ok(m) => {
            let branch = m.branch.map_or_else(|| "-".to_string(), |b| b.to_string());
            lines.push(format!("    aggregation:      {}", branch));
            lines.push(format!("    points used:      {}", m.points));
            lines.push(format!("    slope per hour:   {}", show(m.slope_per_hour)));
            lines.push(format!("    MK p-value:       {}", show(m.mk_pvalue)));
            lines.push(format!("    early/late delta: {}", show(m.delta_early_late)));
        }
        Err(e) => lines.push(format!("    unavailable: {}", e)),
    }

    lines.push(format!("  Request log: {}", outcome.run.request_log_path.display()));
    match &outcome.latency {
        Ok(m) => {
            let encoding = m.encoding.map_or_else(|| "-".to_string(), |e| e.to_string());
            lines.push(format!("    encoding:         {}", encoding));
            lines.push(format!("    total errors:     {}", m.total_errors));
            lines.push(format!("    filtered rows:    {}", m.filtered_requests));
            lines.push(format!("    retained bins:    {}", m.bins));
            lines.push(format!("    p95 slope/hour:   {}", show(m.p95_slope_per_hour)));
            lines.push(format!("    MK p-value:       {}", show(m.p95_mk_pvalue)));
            lines.push(format!("    early/late delta: {}", show(m.delta_p95_early_late)));
        }
        Err(e) => lines.push(format!("    unavailable: {}", e)),
    }

    lines.join("\n")
}

/// Execute the inspect command
///
/// **Public** - main entry point called from main.rs
pub fn execute_inspect(args: InspectArgs) -> Result<RunOutcome> {
    args.config.validate()?;

    if !args.run_dir.is_dir() {
        anyhow::bail!("Run directory not found: {}", args.run_dir.display());
    }

    let run = RunArtifacts::for_dir(&args.run_dir);
    info!("Inspecting run {} (filter: {})", run.run_id, args.config.latency_filter);

    let outcome = evaluate_run(&run, &args.config);
    println!("{}", describe_outcome(&outcome));

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::AnalysisConfig;

    #[test]
    fn test_inspect_reports_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = execute_inspect(InspectArgs {
            run_dir: dir.path().to_path_buf(),
            config: AnalysisConfig::default(),
        })
        .unwrap();

        assert!(outcome.resource.is_err());
        assert!(outcome.latency.is_err());
        let text = describe_outcome(&outcome);
        assert!(text.contains("unavailable"));
    }

    #[test]
    fn test_inspect_missing_dir() {
        let args = InspectArgs {
            run_dir: "/definitely/not/here".into(),
            config: AnalysisConfig::default(),
        };
        assert!(execute_inspect(args).is_err());
    }
}
