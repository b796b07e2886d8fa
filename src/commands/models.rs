use crate::utils::config::AnalysisConfig;
use std::path::PathBuf;

/// Arguments for the summarize command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SummarizeArgs {
    /// Directory holding one subdirectory per run
    pub test_root: PathBuf,

    /// Output path for the CSV summary
    pub output_csv: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Merge into an existing summary instead of replacing it
    pub append: bool,

    /// Print the table to stdout
    pub print_table: bool,

    /// Settings applied to every run
    pub config: AnalysisConfig,
}

impl Default for SummarizeArgs {
    fn default() -> Self {
        Self {
            test_root: PathBuf::from("./Test"),
            output_csv: PathBuf::from("summary.csv"),
            output_json: None,
            append: false,
            print_table: true,
            config: AnalysisConfig::default(),
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// A single run directory (containing Output/)
    pub run_dir: PathBuf,

    pub config: AnalysisConfig,
}
