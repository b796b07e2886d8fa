//! Per-run trend metrics.
//!
//! Combines loaders, series builders and trend estimators into two
//! independently nullable metric sets:
//! - resource trend (slope, significance, early/late delta)
//! - latency trend (same, over binned p95) plus the error count

pub mod latency;
pub mod resource;
pub mod window;

// Re-export main types and functions
pub use latency::{
    compute_latency_metrics, count_errors, is_error, latency_metrics_from_records, passes_filter,
    LatencyMetrics,
};
pub use resource::{compute_resource_metrics, resource_metrics_from_table, ResourceMetrics};
pub use window::early_late_delta;
