//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod discover;
pub mod inspect;
pub mod models;
pub mod summarize;
pub mod utils;

// Re-export main command functions
pub use discover::{discover_runs, RunArtifacts};
pub use inspect::{describe_outcome, execute_inspect};
pub use models::{InspectArgs, SummarizeArgs};
pub use summarize::{evaluate_run, execute_summarize, validate_args, RunOutcome};
pub use utils::{display_version, validate_summary_file};
