//! Latency trend metrics and error counting for one run.

use super::window::early_late_delta;
use crate::aggregator::bin_latencies;
use crate::parser::{load_request_log, LogEncoding, RequestRecord};
use crate::trend::{mann_kendall_pvalue, theil_sen_slope};
use crate::utils::config::{
    AnalysisConfig, LatencyFilter, HTTP_ERROR_THRESHOLD, MIN_LATENCY_BINS, MIN_LATENCY_ROWS,
    MS_PER_HOUR,
};
use crate::utils::error::RunError;
use log::debug;
use serde::Serialize;
use std::path::Path;

/// Latency trend metrics; trend fields are `None` when not computable
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LatencyMetrics {
    /// Theil–Sen slope of binned p95, duration units per hour
    pub p95_slope_per_hour: Option<f64>,

    /// Mann–Kendall p-value of binned p95
    pub p95_mk_pvalue: Option<f64>,

    /// median(late p95) − median(early p95)
    pub delta_p95_early_late: Option<f64>,

    /// Failed requests, independent of the latency filter
    pub total_errors: u64,

    /// Encoding the log was read from (diagnostic)
    #[serde(skip)]
    pub encoding: Option<LogEncoding>,

    /// Requests in the latency subset after warm-up (diagnostic)
    #[serde(skip)]
    pub filtered_requests: usize,

    /// Bins retained for the trend (diagnostic)
    #[serde(skip)]
    pub bins: usize,
}

/// Whether a request counts toward the error total
///
/// A request is an error if it failed, returned HTTP >= 400, or has no
/// numeric status code at all.
pub fn is_error(record: &RequestRecord) -> bool {
    match record.response_code {
        Some(code) => !record.success || code >= HTTP_ERROR_THRESHOLD,
        None => true,
    }
}

/// Count errors over every loaded request
pub fn count_errors(records: &[RequestRecord]) -> u64 {
    records.iter().filter(|r| is_error(r)).count() as u64
}

/// Whether a request belongs to the latency subset for `filter`
pub fn passes_filter(record: &RequestRecord, filter: LatencyFilter) -> bool {
    match filter {
        LatencyFilter::All => true,
        LatencyFilter::Success => record.success,
        LatencyFilter::SuccessAndHttpOk => {
            record.success
                && record
                    .response_code
                    .is_some_and(|code| code < HTTP_ERROR_THRESHOLD)
        }
    }
}

/// Load a request log and compute its latency metrics
///
/// **Public** - main entry point for latency metrics
///
/// # Errors
/// Load errors only; too little data yields `None` trend fields
pub fn compute_latency_metrics(
    log_path: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<LatencyMetrics, RunError> {
    let (records, encoding) = load_request_log(log_path)?;

    Ok(LatencyMetrics {
        encoding: Some(encoding),
        ..latency_metrics_from_records(&records, config)
    })
}

/// Compute latency metrics from already-loaded requests
///
/// **Public** - pure computation, used directly by tests
pub fn latency_metrics_from_records(
    records: &[RequestRecord],
    config: &AnalysisConfig,
) -> LatencyMetrics {
    let total_errors = count_errors(records);
    let undefined = LatencyMetrics {
        total_errors,
        ..Default::default()
    };

    // Time axis starts at the earliest parseable request
    let Some(t0) = records
        .iter()
        .filter_map(|r| r.timestamp_ms)
        .reduce(f64::min)
    else {
        debug!("No request has a usable timestamp; latency metrics undefined");
        return undefined;
    };

    // Warm-up exclusion, then latency filter
    let subset: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| {
            let hours = (r.timestamp_ms? - t0) / MS_PER_HOUR;
            let elapsed = r.elapsed?;
            (hours >= config.warmup_hours && passes_filter(r, config.latency_filter))
                .then_some((hours, elapsed))
        })
        .collect();

    if subset.len() < MIN_LATENCY_ROWS {
        debug!(
            "Only {} requests pass '{}' after warm-up; latency metrics undefined",
            subset.len(),
            config.latency_filter
        );
        return LatencyMetrics {
            filtered_requests: subset.len(),
            ..undefined
        };
    }

    let bins = bin_latencies(&subset, config);
    if bins.len() < MIN_LATENCY_BINS {
        debug!("Only {} latency bins retained; latency metrics undefined", bins.len());
        return LatencyMetrics {
            filtered_requests: subset.len(),
            bins: bins.len(),
            ..undefined
        };
    }

    let (hours, p95): (Vec<f64>, Vec<f64>) = bins.iter().map(|b| (b.start_hours, b.p95)).unzip();

    LatencyMetrics {
        p95_slope_per_hour: theil_sen_slope(&hours, &p95),
        p95_mk_pvalue: mann_kendall_pvalue(&p95),
        delta_p95_early_late: early_late_delta(&hours, &p95, config),
        total_errors,
        encoding: None,
        filtered_requests: subset.len(),
        bins: bins.len(),
    }
}
