//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a run artifact
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML parsing failed: {0}")]
    Xml(String),

    #[error("{path} missing '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Could not parse {path} as CSV or XML: {reason}")]
    Unparseable { path: PathBuf, reason: String },
}

/// Errors that can occur while building a canonical series
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("monitor table lacks both aggregate markers and a component column; cannot aggregate")]
    NoAggregationSource,
}

/// Errors that can occur while computing one run's metrics
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Invalid user configuration; always fatal
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Test root not found or not a directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("Invalid latency filter '{0}' (expected one of: all, success, success-and-http-ok)")]
    InvalidFilterMode(String),

    #[error("Invalid setting: {0}")]
    InvalidValue(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to move temporary file into place: {0}")]
    PersistFailed(#[from] tempfile::PersistError),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
