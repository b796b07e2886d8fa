//! Fixed-width time bins of request latency.
//!
//! Raw per-request latency is too noisy to fit a trend to directly, so
//! requests are grouped into bins and each bin contributes its p95.

use crate::trend::percentile;
use crate::utils::config::{AnalysisConfig, LATENCY_PERCENTILE};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// One retained latency bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyBin {
    /// floor(elapsed minutes / bin width)
    pub index: i64,

    /// Bin start, in hours since the first request
    pub start_hours: f64,

    /// 95th percentile of elapsed durations in the bin
    pub p95: f64,

    /// Requests in the bin
    pub count: usize,
}

/// Group (hours, elapsed) samples into bins and keep the well-populated ones
///
/// **Public** - main entry point for latency binning
///
/// # Arguments
/// * `samples` - (hours since first request, elapsed duration) pairs
/// * `config` - bin width and minimum samples per bin
///
/// # Returns
/// Bins with at least `min_samples_per_bin` requests, ascending by index.
/// Sparse bins are dropped, never interpolated.
pub fn bin_latencies(samples: &[(f64, f64)], config: &AnalysisConfig) -> Vec<LatencyBin> {
    let mut groups: BTreeMap<i64, Vec<f64>> = BTreeMap::new();

    for &(hours, elapsed) in samples {
        if hours.is_nan() || elapsed.is_nan() {
            continue;
        }
        let minutes = hours * 60.0;
        let index = (minutes / config.bin_minutes).floor() as i64;
        groups.entry(index).or_default().push(elapsed);
    }

    let total_bins = groups.len();

    let bins: Vec<LatencyBin> = groups
        .into_iter()
        .filter(|(_, values)| values.len() >= config.min_samples_per_bin)
        .filter_map(|(index, values)| {
            let p95 = percentile(&values, LATENCY_PERCENTILE)?;
            Some(LatencyBin {
                index,
                start_hours: index as f64 * config.bin_minutes / 60.0,
                p95,
                count: values.len(),
            })
        })
        .collect();

    debug!(
        "Latency bins: kept {} of {} (min {} samples, width {} min)",
        bins.len(),
        total_bins,
        config.min_samples_per_bin,
        config.bin_minutes
    );

    bins
}
