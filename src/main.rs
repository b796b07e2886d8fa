//! Aging Summary CLI
//!
//! Summarizes resource and latency trends across load-test runs.

use aging_summary::commands::{
    display_version, execute_inspect, execute_summarize, validate_summary_file, InspectArgs,
    SummarizeArgs,
};
use aging_summary::utils::config::{AnalysisConfig, LatencyFilter};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Aging Summary - robust trend summaries for long-running load tests
#[derive(Parser, Debug)]
#[command(name = "aging-summary")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Settings shared by every command that computes metrics
#[derive(Args, Debug)]
struct AnalysisOpts {
    /// Warm-up to exclude (hours)
    #[arg(long, default_value_t = 0.5)]
    warmup_hours: f64,

    /// Early window start (hours)
    #[arg(long, default_value_t = 1.0)]
    early_start_hours: f64,

    /// Early window end (hours)
    #[arg(long, default_value_t = 2.0)]
    early_end_hours: f64,

    /// Late window duration (hours)
    #[arg(long, default_value_t = 2.0)]
    late_duration_hours: f64,

    /// Bin size (minutes) for the p95 time series
    #[arg(long, default_value_t = 1.0)]
    bin_minutes: f64,

    /// Which requests to include in the p95 trend: all, success, success-and-http-ok
    #[arg(long, default_value = "success-and-http-ok")]
    latency_filter: LatencyFilter,

    /// Minimum samples per bin for p95
    #[arg(long, default_value_t = 5)]
    min_samples_per_bin: usize,
}

impl From<AnalysisOpts> for AnalysisConfig {
    fn from(opts: AnalysisOpts) -> Self {
        Self {
            warmup_hours: opts.warmup_hours,
            early_start_hours: opts.early_start_hours,
            early_end_hours: opts.early_end_hours,
            late_duration_hours: opts.late_duration_hours,
            bin_minutes: opts.bin_minutes,
            latency_filter: opts.latency_filter,
            min_samples_per_bin: opts.min_samples_per_bin,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize every run under a test root into one table
    Summarize {
        /// Directory containing <run>/Output/ folders
        #[arg(short = 'r', long, env = "AGING_TEST_ROOT")]
        test_root: PathBuf,

        /// Output summary CSV
        #[arg(short, long, default_value = "summary.csv")]
        out: PathBuf,

        /// Also write a JSON report to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Merge into an existing summary instead of replacing it
        #[arg(long)]
        append: bool,

        /// Do not print the table to stdout
        #[arg(long)]
        quiet: bool,

        #[command(flatten)]
        analysis: AnalysisOpts,
    },

    /// Compute and explain the metrics of a single run
    Inspect {
        /// Run directory (containing Output/)
        #[arg(long)]
        run_dir: PathBuf,

        #[command(flatten)]
        analysis: AnalysisOpts,
    },

    /// Validate a summary CSV file
    Validate {
        /// Path to summary CSV file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Summarize {
            test_root,
            out,
            json,
            append,
            quiet,
            analysis,
        } => {
            let args = SummarizeArgs {
                test_root,
                output_csv: out,
                output_json: json,
                append,
                print_table: !quiet,
                config: analysis.into(),
            };

            execute_summarize(args)?;
        }

        Commands::Inspect { run_dir, analysis } => {
            execute_inspect(InspectArgs {
                run_dir,
                config: analysis.into(),
            })?;
        }

        Commands::Validate { file } => {
            validate_summary_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
