use aging_summary::trend::{mann_kendall, mann_kendall_pvalue, median, percentile, theil_sen_slope};
use pretty_assertions::assert_eq;

#[test]
fn test_mann_kendall_increasing_series() {
    let values: Vec<f64> = (1..=20).map(f64::from).collect();
    let mk = mann_kendall(&values).unwrap();

    assert_eq!(mk.n, 20);
    assert_eq!(mk.s, 190);
    assert!(mk.z > 0.0);
    assert!(mk.p_value < 0.01);
}

#[test]
fn test_mann_kendall_decreasing_is_symmetric() {
    let up: Vec<f64> = (1..=12).map(f64::from).collect();
    let down: Vec<f64> = up.iter().rev().copied().collect();

    let a = mann_kendall(&up).unwrap();
    let b = mann_kendall(&down).unwrap();
    assert_eq!(a.s, -b.s);
    assert!((a.p_value - b.p_value).abs() < 1e-12);
}

#[test]
fn test_mann_kendall_ignores_nan_and_needs_three_values() {
    assert_eq!(mann_kendall_pvalue(&[1.0, f64::NAN, 2.0]), None);

    let with_gap = mann_kendall(&[1.0, f64::NAN, 2.0, 3.0]).unwrap();
    assert_eq!(with_gap.n, 3);
    assert_eq!(with_gap.s, 3);
}

#[test]
fn test_mann_kendall_all_ties() {
    assert_eq!(mann_kendall_pvalue(&[7.0; 30]), Some(1.0));
}

#[test]
fn test_pvalue_stays_in_unit_interval() {
    let series: [&[f64]; 4] = [
        &[1.0, 2.0, 3.0],
        &[3.0, 1.0, 2.0],
        &[1.0, 1.0, 2.0, 2.0, 3.0],
        &[5.0, 4.0, 6.0, 3.0, 7.0, 2.0],
    ];
    for values in series {
        let p = mann_kendall_pvalue(values).unwrap();
        assert!((0.0..=1.0).contains(&p), "p = {} for {:?}", p, values);
    }
}

#[test]
fn test_theil_sen_recovers_line() {
    let x: Vec<f64> = (0..50).map(|i| f64::from(i) * 0.1).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 - 2.0 * v).collect();
    let slope = theil_sen_slope(&x, &y).unwrap();
    assert!((slope + 2.0).abs() < 1e-9);
}

#[test]
fn test_theil_sen_undefined_cases() {
    assert_eq!(theil_sen_slope(&[1.0], &[1.0]), None);
    // every pair shares x
    assert_eq!(theil_sen_slope(&[2.0, 2.0, 2.0], &[1.0, 5.0, 9.0]), None);
    // NaN removes the pair, leaving one point
    assert_eq!(theil_sen_slope(&[0.0, 1.0], &[f64::NAN, 1.0]), None);
}

#[test]
fn test_order_statistics() {
    assert_eq!(median(&[]), None);
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    let p95 = percentile(&[10.0, 20.0, 30.0, 40.0, 50.0], 0.95).unwrap();
    assert!((p95 - 48.0).abs() < 1e-9);
    assert_eq!(percentile(&[42.0], 0.95), Some(42.0));
}
