//! Configuration and constants for the analysis pipeline.

use super::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Current summary/report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Artifact layout inside a run directory: <root>/<run>/Output/<file>
pub const RUN_OUTPUT_DIR: &str = "Output";
pub const MONITOR_FILE_NAME: &str = "monitor_results.csv";
pub const REQUEST_LOG_FILE_NAME: &str = "jmeter_results.jtl";

// Column names for the monitor table (first match wins)
pub const TIMESTAMP_FIELD_NAMES: &[&str] = &["timestamp", "timeStamp", "timestamp_ms", "ts"];
pub const USAGE_FIELD_NAMES: &[&str] = &["memory_mib", "usage", "value"];
pub const COMPONENT_FIELD_NAMES: &[&str] = &["container_name", "component"];
pub const SCOPE_FIELD_NAME: &str = "scope";

/// Scope tag of whole-run aggregate rows
pub const AGGREGATE_SCOPE: &str = "project";

/// Component identifier used for aggregate rows by monitors without a scope column
pub const AGGREGATE_COMPONENT: &str = "ALL";

// JMeter CSV header names
pub const JTL_TIMESTAMP_FIELD: &str = "timeStamp";
pub const JTL_ELAPSED_FIELD: &str = "elapsed";
pub const JTL_SUCCESS_FIELD: &str = "success";
pub const JTL_RESPONSE_CODE_FIELD: &str = "responseCode";
pub const JTL_LABEL_FIELD: &str = "label";
pub const JTL_MESSAGE_FIELD: &str = "responseMessage";

/// XML element names that carry one request each
pub const JTL_SAMPLE_ELEMENTS: &[&str] = &["httpSample", "sample"];

/// Values accepted as a true success flag (compared case-insensitively)
pub const TRUTHY_VALUES: &[&str] = &["true", "1", "yes", "y"];

/// HTTP status codes at or above this value count as errors
pub const HTTP_ERROR_THRESHOLD: i64 = 400;

/// Minimum points (after warm-up) for the resource trend
pub const MIN_RESOURCE_POINTS: usize = 3;

/// Minimum filtered requests (after warm-up) for the latency trend
pub const MIN_LATENCY_ROWS: usize = 10;

/// Minimum retained bins for the latency trend
pub const MIN_LATENCY_BINS: usize = 5;

/// Percentile computed in every latency bin
pub const LATENCY_PERCENTILE: f64 = 0.95;

pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Which requests feed the latency percentile series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LatencyFilter {
    /// Every request, including rejected ones
    All,
    /// Requests whose success flag is true
    Success,
    /// Successful requests with an HTTP status below 400
    #[default]
    SuccessAndHttpOk,
}

impl LatencyFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            LatencyFilter::All => "all",
            LatencyFilter::Success => "success",
            LatencyFilter::SuccessAndHttpOk => "success-and-http-ok",
        }
    }
}

impl fmt::Display for LatencyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatencyFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LatencyFilter::All),
            "success" => Ok(LatencyFilter::Success),
            // "http<400" is the name older scripts used for the default
            "success-and-http-ok" | "http<400" => Ok(LatencyFilter::SuccessAndHttpOk),
            _ => Err(ConfigError::InvalidFilterMode(s.to_string())),
        }
    }
}

/// Immutable settings threaded through every metric computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Samples earlier than this (hours since run start) are ignored
    pub warmup_hours: f64,

    /// Early window start, inclusive (hours)
    pub early_start_hours: f64,

    /// Early window end, exclusive (hours)
    pub early_end_hours: f64,

    /// Length of the trailing late window (hours)
    pub late_duration_hours: f64,

    /// Latency bin width (minutes)
    pub bin_minutes: f64,

    /// Request subset used for the latency series
    pub latency_filter: LatencyFilter,

    /// Bins with fewer requests are dropped
    pub min_samples_per_bin: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            warmup_hours: 0.5,
            early_start_hours: 1.0,
            early_end_hours: 2.0,
            late_duration_hours: 2.0,
            bin_minutes: 1.0,
            latency_filter: LatencyFilter::default(),
            min_samples_per_bin: 5,
        }
    }
}

impl AnalysisConfig {
    /// Reject settings that would make every window or bin meaningless
    ///
    /// **Public** - called by commands before any run is touched
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("warmup-hours", self.warmup_hours),
            ("early-start-hours", self.early_start_hours),
            ("early-end-hours", self.early_end_hours),
            ("late-duration-hours", self.late_duration_hours),
            ("bin-minutes", self.bin_minutes),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::InvalidValue(format!("{} must be a finite number", name)));
        }

        if self.warmup_hours < 0.0 {
            return Err(ConfigError::InvalidValue(
                "warmup-hours cannot be negative".to_string(),
            ));
        }
        if self.early_start_hours >= self.early_end_hours {
            return Err(ConfigError::InvalidValue(format!(
                "early window is empty: start {} >= end {}",
                self.early_start_hours, self.early_end_hours
            )));
        }
        if self.late_duration_hours <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "late-duration-hours must be greater than 0".to_string(),
            ));
        }
        if self.bin_minutes <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "bin-minutes must be greater than 0".to_string(),
            ));
        }
        if self.min_samples_per_bin == 0 {
            return Err(ConfigError::InvalidValue(
                "min-samples-per-bin must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
