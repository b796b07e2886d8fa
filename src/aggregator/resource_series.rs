//! Build one whole-run resource series from the monitor table.
//!
//! Monitors report at different granularities. Preference order:
//! 1. rows with scope == "project"
//! 2. rows with component == "ALL"
//! 3. sum of every component's usage at each timestamp
//!
//! Exactly one source is used; aggregate rows are never added to component rows.

use crate::parser::schema::ResourceTable;
use crate::utils::config::{AGGREGATE_COMPONENT, AGGREGATE_SCOPE, MS_PER_HOUR};
use crate::utils::error::SeriesError;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which rows produced the whole-run series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationBranch {
    /// Rows tagged with the aggregate scope
    ScopeTagged,
    /// Rows whose component is the aggregate sentinel
    SentinelComponent,
    /// Per-timestamp sum over components
    ComponentSum,
}

impl std::fmt::Display for AggregationBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AggregationBranch::ScopeTagged => "scope-tagged",
            AggregationBranch::SentinelComponent => "sentinel-component",
            AggregationBranch::ComponentSum => "component-sum",
        };
        f.write_str(name)
    }
}

/// One point of a canonical series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Hours since the first point of the series
    pub hours: f64,
    pub value: f64,
}

/// Decide which rows represent the whole run
///
/// **Public** - depends only on which tag values are present
///
/// # Errors
/// * `SeriesError::NoAggregationSource` - no aggregate markers and no
///   component column to sum over
pub fn select_aggregation(table: &ResourceTable) -> Result<AggregationBranch, SeriesError> {
    let samples = &table.samples;

    if samples
        .iter()
        .any(|s| s.scope.as_deref() == Some(AGGREGATE_SCOPE))
    {
        return Ok(AggregationBranch::ScopeTagged);
    }

    if samples
        .iter()
        .any(|s| s.component.as_deref() == Some(AGGREGATE_COMPONENT))
    {
        return Ok(AggregationBranch::SentinelComponent);
    }

    if !table.has_component {
        return Err(SeriesError::NoAggregationSource);
    }

    Ok(AggregationBranch::ComponentSum)
}

/// Whole-run usage per timestamp for the given branch
///
/// **Public** - output is ordered by timestamp; rows without a usage value
/// are skipped, and a timestamp with no usable row is dropped
pub fn aggregate_usage(table: &ResourceTable, branch: AggregationBranch) -> Vec<(i64, f64)> {
    let samples = table.samples.iter();

    let mut points: Vec<(i64, f64)> = match branch {
        AggregationBranch::ScopeTagged => samples
            .filter(|s| s.scope.as_deref() == Some(AGGREGATE_SCOPE))
            .filter_map(|s| s.usage.map(|u| (s.timestamp_ms, u)))
            .collect(),
        AggregationBranch::SentinelComponent => samples
            .filter(|s| s.component.as_deref() == Some(AGGREGATE_COMPONENT))
            .filter_map(|s| s.usage.map(|u| (s.timestamp_ms, u)))
            .collect(),
        AggregationBranch::ComponentSum => {
            let mut sums: BTreeMap<i64, f64> = BTreeMap::new();
            for s in samples {
                if let Some(u) = s.usage {
                    *sums.entry(s.timestamp_ms).or_insert(0.0) += u;
                }
            }
            sums.into_iter().collect()
        }
    };

    points.sort_by_key(|(ts, _)| *ts);
    points
}

/// Convert (timestamp, value) pairs to hours since the first timestamp
pub fn to_elapsed_hours(points: &[(i64, f64)]) -> Vec<SeriesPoint> {
    let Some(&(t0, _)) = points.first() else {
        return Vec::new();
    };

    points
        .iter()
        .map(|&(ts, value)| SeriesPoint {
            hours: (ts - t0) as f64 / MS_PER_HOUR,
            value,
        })
        .collect()
}

/// Canonical resource series for a run
///
/// **Public** - main entry point for resource canonicalization
///
/// # Returns
/// The series (hours since first sample) and the branch that produced it
pub fn build_resource_series(
    table: &ResourceTable,
) -> Result<(Vec<SeriesPoint>, AggregationBranch), SeriesError> {
    let branch = select_aggregation(table)?;
    let points = aggregate_usage(table, branch);

    debug!(
        "Resource series: {} points from {} rows via {}",
        points.len(),
        table.len(),
        branch
    );

    Ok((to_elapsed_hours(&points), branch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::ResourceSample;

    fn sample(ts: i64, scope: Option<&str>, component: Option<&str>, usage: f64) -> ResourceSample {
        ResourceSample {
            timestamp_ms: ts,
            scope: scope.map(str::to_string),
            component: component.map(str::to_string),
            usage: Some(usage),
        }
    }

    fn table(samples: Vec<ResourceSample>, has_scope: bool, has_component: bool) -> ResourceTable {
        ResourceTable {
            samples,
            has_scope,
            has_component,
        }
    }

    #[test]
    fn test_scope_tag_wins_over_components() {
        // components sum to 30, project row says 100
        let t = table(
            vec![
                sample(0, Some("container"), Some("web"), 10.0),
                sample(0, Some("container"), Some("db"), 20.0),
                sample(0, Some("project"), Some("ALL"), 100.0),
            ],
            true,
            true,
        );

        assert_eq!(select_aggregation(&t).unwrap(), AggregationBranch::ScopeTagged);
        assert_eq!(aggregate_usage(&t, AggregationBranch::ScopeTagged), vec![(0, 100.0)]);
    }

    #[test]
    fn test_sentinel_component_without_scope() {
        let t = table(
            vec![
                sample(0, None, Some("web"), 10.0),
                sample(0, None, Some("ALL"), 55.0),
                sample(1000, None, Some("ALL"), 56.0),
            ],
            false,
            true,
        );

        assert_eq!(
            select_aggregation(&t).unwrap(),
            AggregationBranch::SentinelComponent
        );
        assert_eq!(
            aggregate_usage(&t, AggregationBranch::SentinelComponent),
            vec![(0, 55.0), (1000, 56.0)]
        );
    }

    #[test]
    fn test_component_sum_fallback() {
        let mut samples = vec![
            sample(1000, Some("container"), Some("web"), 10.0),
            sample(1000, Some("container"), Some("db"), 20.0),
            sample(2000, Some("container"), Some("web"), 11.0),
        ];
        samples.push(ResourceSample {
            usage: None,
            ..sample(2000, Some("container"), Some("db"), 0.0)
        });
        samples.push(ResourceSample {
            usage: None,
            ..sample(3000, Some("container"), Some("db"), 0.0)
        });
        let t = table(samples, true, true);

        assert_eq!(select_aggregation(&t).unwrap(), AggregationBranch::ComponentSum);
        assert_eq!(
            aggregate_usage(&t, AggregationBranch::ComponentSum),
            vec![(1000, 30.0), (2000, 11.0)]
        );
    }

    #[test]
    fn test_no_source_is_an_error() {
        let t = table(vec![sample(0, None, None, 1.0)], false, false);
        assert!(matches!(
            select_aggregation(&t),
            Err(SeriesError::NoAggregationSource)
        ));
    }

    #[test]
    fn test_elapsed_hours() {
        let series = to_elapsed_hours(&[(1_000, 1.0), (1_000 + 1_800_000, 2.0), (1_000 + 7_200_000, 3.0)]);
        let hours: Vec<f64> = series.iter().map(|p| p.hours).collect();
        assert_eq!(hours, vec![0.0, 0.5, 2.0]);
        assert!(to_elapsed_hours(&[]).is_empty());
    }
}
