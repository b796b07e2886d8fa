//! Series construction from loaded tables.
//!
//! This module transforms loaded rows into:
//! - One whole-run resource series (aggregation branch chosen from the data)
//! - A binned p95 latency series

pub mod latency_bins;
pub mod resource_series;

// Re-export main types and functions
pub use latency_bins::{bin_latencies, LatencyBin};
pub use resource_series::{
    aggregate_usage, build_resource_series, select_aggregation, to_elapsed_hours,
    AggregationBranch, SeriesPoint,
};
