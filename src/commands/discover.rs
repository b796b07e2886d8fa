//! Run discovery.
//!
//! A run is any immediate subdirectory of the test root that contains both
//!   <run>/Output/monitor_results.csv
//!   <run>/Output/jmeter_results.jtl
//! Directories missing either file are skipped.

use crate::utils::config::{MONITOR_FILE_NAME, REQUEST_LOG_FILE_NAME, RUN_OUTPUT_DIR};
use crate::utils::error::ConfigError;
use log::debug;
use std::path::{Path, PathBuf};

/// Artifact locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    /// Run directory name
    pub run_id: String,
    pub monitor_path: PathBuf,
    pub request_log_path: PathBuf,
}

impl RunArtifacts {
    /// Expected artifact paths for a run directory (existence not checked)
    pub fn for_dir(run_dir: &Path) -> Self {
        let output_dir = run_dir.join(RUN_OUTPUT_DIR);
        let run_id = run_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| run_dir.display().to_string());

        Self {
            run_id,
            monitor_path: output_dir.join(MONITOR_FILE_NAME),
            request_log_path: output_dir.join(REQUEST_LOG_FILE_NAME),
        }
    }

    /// Both artifacts exist
    pub fn is_complete(&self) -> bool {
        self.monitor_path.is_file() && self.request_log_path.is_file()
    }
}

/// Enumerate complete runs under `test_root`, sorted by run id
///
/// **Public** - main entry point for discovery
///
/// # Errors
/// * `ConfigError::InvalidRoot` - root missing, not a directory, or unreadable
pub fn discover_runs(test_root: &Path) -> Result<Vec<RunArtifacts>, ConfigError> {
    if !test_root.is_dir() {
        return Err(ConfigError::InvalidRoot(test_root.to_path_buf()));
    }

    let entries =
        std::fs::read_dir(test_root).map_err(|_| ConfigError::InvalidRoot(test_root.to_path_buf()))?;

    let mut runs: Vec<RunArtifacts> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .map(|path| RunArtifacts::for_dir(&path))
        .filter(|run| {
            let complete = run.is_complete();
            if !complete {
                debug!("Skipping {}: missing run artifacts", run.run_id);
            }
            complete
        })
        .collect();

    runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));

    debug!("Discovered {} runs under {}", runs.len(), test_root.display());

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_run(root: &Path, name: &str, monitor: bool, log: bool) {
        let out = root.join(name).join(RUN_OUTPUT_DIR);
        fs::create_dir_all(&out).unwrap();
        if monitor {
            fs::write(out.join(MONITOR_FILE_NAME), "timestamp,memory_mib\n").unwrap();
        }
        if log {
            fs::write(out.join(REQUEST_LOG_FILE_NAME), "timeStamp,elapsed,success\n").unwrap();
        }
    }

    #[test]
    fn test_discover_skips_incomplete_runs() {
        let root = tempfile::tempdir().unwrap();
        make_run(root.path(), "zeta", true, true);
        make_run(root.path(), "alpha", true, true);
        make_run(root.path(), "no-log", true, false);
        make_run(root.path(), "no-monitor", false, true);
        fs::write(root.path().join("notes.txt"), "not a run").unwrap();

        let runs = discover_runs(root.path()).unwrap();
        let ids: Vec<&str> = runs.iter().map(|r| r.run_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_discover_invalid_root() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("missing");
        assert!(matches!(
            discover_runs(&missing),
            Err(ConfigError::InvalidRoot(_))
        ));
    }

    #[test]
    fn test_artifact_paths() {
        let run = RunArtifacts::for_dir(Path::new("/tmp/Test/app-1"));
        assert_eq!(run.run_id, "app-1");
        assert_eq!(
            run.monitor_path,
            PathBuf::from("/tmp/Test/app-1/Output/monitor_results.csv")
        );
        assert_eq!(
            run.request_log_path,
            PathBuf::from("/tmp/Test/app-1/Output/jmeter_results.jtl")
        );
    }
}
