//! Utility modules for configuration and error handling.

pub mod config;
pub mod error;

// Re-export commonly used types for convenience
pub use config::{AnalysisConfig, LatencyFilter};
pub use error::{ConfigError, LoadError, OutputError, RunError, SeriesError};
