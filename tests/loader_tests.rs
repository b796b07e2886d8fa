use aging_summary::aggregator::{build_resource_series, AggregationBranch};
use aging_summary::metrics::compute_latency_metrics;
use aging_summary::parser::{load_request_log, load_resource_table, LogEncoding};
use aging_summary::utils::config::AnalysisConfig;
use aging_summary::utils::error::{LoadError, RunError, SeriesError};
use pretty_assertions::assert_eq;
use std::fmt::Write as _;
use std::fs;

#[test]
fn test_xml_log_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jmeter_results.jtl");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<testResults version="1.2">
<httpSample t="40" ts="1700000000000" s="true" lb="home" rc="200" rm="OK"/>
<httpSample t="45" ts="1700000001000" s="false" lb="home" rc="503" rm="Unavailable"/>
<sample t="50" ts="1700000002000" s="true" lb="tx" rc="" rm="Number of samples in transaction : 1"/>
</testResults>
"#,
    )
    .unwrap();

    let (rows, encoding) = load_request_log(&path).unwrap();
    assert_eq!(encoding, LogEncoding::Xml);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].response_code, Some(503));
    assert_eq!(rows[2].response_code, None);

    let metrics = compute_latency_metrics(&path, &AnalysisConfig::default()).unwrap();
    // the 503 and the sample without a status code
    assert_eq!(metrics.total_errors, 2);
    assert_eq!(metrics.p95_slope_per_hour, None);
    assert_eq!(metrics.encoding, Some(LogEncoding::Xml));
}

#[test]
fn test_missing_files_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_resource_table(dir.path().join("monitor_results.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));

    let err = compute_latency_metrics(dir.path().join("nope.jtl"), &AnalysisConfig::default())
        .unwrap_err();
    assert!(matches!(err, RunError::Load(LoadError::Io { .. })));
}

#[test]
fn test_component_sum_without_markers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monitor_results.csv");
    let mut csv = String::from("timestamp,container_name,memory_mib\n");
    for i in 0..4i64 {
        writeln!(csv, "{},web,{}", i * 3_600_000, 10 + i).unwrap();
        writeln!(csv, "{},db,{}", i * 3_600_000, 20 + i).unwrap();
    }
    fs::write(&path, csv).unwrap();

    let table = load_resource_table(&path).unwrap();
    let (series, branch) = build_resource_series(&table).unwrap();

    assert_eq!(branch, AggregationBranch::ComponentSum);
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![30.0, 32.0, 34.0, 36.0]);
    let hours: Vec<f64> = series.iter().map(|p| p.hours).collect();
    assert_eq!(hours, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_no_aggregation_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monitor_results.csv");
    fs::write(&path, "timestamp,memory_mib\n0,1\n1000,2\n2000,3\n").unwrap();

    let table = load_resource_table(&path).unwrap();
    let err = build_resource_series(&table).unwrap_err();
    assert!(matches!(err, SeriesError::NoAggregationSource));
}
