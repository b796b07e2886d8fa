//! Summary table and report schema.
//!
//! `SummaryRow` field order is the CSV column order.

use crate::metrics::{LatencyMetrics, ResourceMetrics};
use crate::utils::config::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// CSV header, in `SummaryRow` field order
pub const SUMMARY_COLUMNS: [&str; 8] = [
    "run_id",
    "resource_slope_per_hour",
    "resource_mk_pvalue",
    "p95_slope_per_hour",
    "p95_mk_pvalue",
    "delta_resource_early_late",
    "delta_p95_early_late",
    "total_errors",
];

/// One run's trend summary; `None` is written as an empty cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub run_id: String,
    pub resource_slope_per_hour: Option<f64>,
    pub resource_mk_pvalue: Option<f64>,
    pub p95_slope_per_hour: Option<f64>,
    pub p95_mk_pvalue: Option<f64>,
    pub delta_resource_early_late: Option<f64>,
    pub delta_p95_early_late: Option<f64>,
    pub total_errors: Option<u64>,
}

impl SummaryRow {
    /// Assemble a row from the two metric sets
    ///
    /// `latency` is `None` when the request log could not be loaded, which
    /// also leaves the error count undefined.
    pub fn new(
        run_id: impl Into<String>,
        resource: &ResourceMetrics,
        latency: Option<&LatencyMetrics>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            resource_slope_per_hour: resource.slope_per_hour,
            resource_mk_pvalue: resource.mk_pvalue,
            p95_slope_per_hour: latency.and_then(|l| l.p95_slope_per_hour),
            p95_mk_pvalue: latency.and_then(|l| l.p95_mk_pvalue),
            delta_resource_early_late: resource.delta_early_late,
            delta_p95_early_late: latency.and_then(|l| l.delta_p95_early_late),
            total_errors: latency.map(|l| l.total_errors),
        }
    }
}

/// JSON rendering of a summarize invocation
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// Directory the runs were discovered under
    pub test_root: String,

    /// Settings used for every run
    pub config: AnalysisConfig,

    pub rows: Vec<SummaryRow>,
}
