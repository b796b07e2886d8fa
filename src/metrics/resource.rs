//! Resource (e.g. memory) trend metrics for one run.

use super::window::early_late_delta;
use crate::aggregator::{build_resource_series, AggregationBranch};
use crate::parser::{load_resource_table, ResourceTable};
use crate::trend::{mann_kendall_pvalue, theil_sen_slope};
use crate::utils::config::{AnalysisConfig, MIN_RESOURCE_POINTS};
use crate::utils::error::RunError;
use log::debug;
use serde::Serialize;
use std::path::Path;

/// Resource trend metrics; every field is `None` when not computable
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResourceMetrics {
    /// Theil–Sen slope, usage units per hour
    pub slope_per_hour: Option<f64>,

    /// Mann–Kendall two-sided p-value
    pub mk_pvalue: Option<f64>,

    /// median(late) − median(early)
    pub delta_early_late: Option<f64>,

    /// Aggregation branch used (diagnostic, not part of the summary row)
    #[serde(skip)]
    pub branch: Option<AggregationBranch>,

    /// Points left after warm-up (diagnostic)
    #[serde(skip)]
    pub points: usize,
}

/// Load a monitor CSV and compute its resource metrics
///
/// **Public** - main entry point for resource metrics
///
/// # Errors
/// Load and aggregation errors only; too little data yields `None` fields
pub fn compute_resource_metrics(
    monitor_path: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<ResourceMetrics, RunError> {
    let table = load_resource_table(monitor_path)?;
    resource_metrics_from_table(&table, config)
}

/// Compute resource metrics from an already-loaded table
///
/// **Public** - pure computation, used directly by tests
pub fn resource_metrics_from_table(
    table: &ResourceTable,
    config: &AnalysisConfig,
) -> Result<ResourceMetrics, RunError> {
    let (series, branch) = build_resource_series(table)?;

    // Warm-up exclusion
    let (hours, values): (Vec<f64>, Vec<f64>) = series
        .iter()
        .filter(|p| p.hours >= config.warmup_hours)
        .map(|p| (p.hours, p.value))
        .unzip();

    if hours.len() < MIN_RESOURCE_POINTS {
        debug!(
            "Only {} resource points after {}h warm-up; metrics undefined",
            hours.len(),
            config.warmup_hours
        );
        return Ok(ResourceMetrics {
            branch: Some(branch),
            points: hours.len(),
            ..Default::default()
        });
    }

    Ok(ResourceMetrics {
        slope_per_hour: theil_sen_slope(&hours, &values),
        mk_pvalue: mann_kendall_pvalue(&values),
        delta_early_late: early_late_delta(&hours, &values, config),
        branch: Some(branch),
        points: hours.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ResourceSample;

    fn project_table(points: &[(i64, f64)]) -> ResourceTable {
        ResourceTable {
            samples: points
                .iter()
                .map(|&(ts, v)| ResourceSample {
                    timestamp_ms: ts,
                    scope: Some("project".to_string()),
                    component: Some("ALL".to_string()),
                    usage: Some(v),
                })
                .collect(),
            has_scope: true,
            has_component: true,
        }
    }

    #[test]
    fn test_linear_growth() {
        // every 6 minutes for 3 hours, 100 MiB/hour
        let points: Vec<(i64, f64)> = (0..=30)
            .map(|i| (i * 360_000, 100.0 + 10.0 * i as f64))
            .collect();
        let metrics =
            resource_metrics_from_table(&project_table(&points), &AnalysisConfig::default()).unwrap();

        assert!((metrics.slope_per_hour.unwrap() - 100.0).abs() < 1e-6);
        assert!(metrics.mk_pvalue.unwrap() < 0.01);
        assert!(metrics.delta_early_late.unwrap() > 0.0);
        assert_eq!(metrics.branch, Some(AggregationBranch::ScopeTagged));
    }

    #[test]
    fn test_too_few_points_after_warmup() {
        let points = vec![(0, 1.0), (600_000, 2.0), (1_800_000, 3.0), (2_400_000, 4.0)];
        let metrics =
            resource_metrics_from_table(&project_table(&points), &AnalysisConfig::default()).unwrap();

        assert_eq!(metrics.points, 2);
        assert_eq!(metrics.slope_per_hour, None);
        assert_eq!(metrics.mk_pvalue, None);
        assert_eq!(metrics.delta_early_late, None);
    }

    #[test]
    fn test_unaggregatable_table_is_error() {
        let table = ResourceTable {
            samples: vec![],
            has_scope: false,
            has_component: false,
        };
        assert!(resource_metrics_from_table(&table, &AnalysisConfig::default()).is_err());
    }
}
