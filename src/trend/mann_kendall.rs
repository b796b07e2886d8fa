//! Mann–Kendall test for a monotonic trend.
//!
//! Every ordered pair (i < j) votes +1 if the series went up, -1 if it went
//! down. The sum S is compared with its variance under "no trend", corrected
//! for tied values, and turned into a two-sided p-value.

use super::descriptive::normal_sf;
use log::trace;
use std::cmp::Ordering;

/// Full Mann–Kendall result, useful for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MannKendall {
    /// Number of non-NaN values used
    pub n: usize,

    /// Sum of pairwise signs
    pub s: i64,

    /// Tie-corrected variance of S
    pub var_s: f64,

    /// Continuity-corrected standard score
    pub z: f64,

    /// Two-sided p-value in [0, 1]
    pub p_value: f64,
}

/// Run the Mann–Kendall test
///
/// **Public** - main entry point for trend significance
///
/// # Arguments
/// * `values` - Series in time order; NaN entries are removed first
///
/// # Returns
/// `None` if fewer than 3 values remain. A series whose corrected variance
/// is not positive (e.g. constant) reports p = 1.0.
pub fn mann_kendall(values: &[f64]) -> Option<MannKendall> {
    let y: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let n = y.len();
    if n < 3 {
        return None;
    }

    let s = s_statistic(&y);

    let nf = n as f64;
    let var_s = (nf * (nf - 1.0) * (2.0 * nf + 5.0) - tie_term(&y)) / 18.0;
    if var_s <= 0.0 {
        trace!("Mann-Kendall: degenerate variance for {} values", n);
        return Some(MannKendall {
            n,
            s,
            var_s,
            z: 0.0,
            p_value: 1.0,
        });
    }

    let sd = var_s.sqrt();
    let z = match s.cmp(&0) {
        Ordering::Greater => (s - 1) as f64 / sd,
        Ordering::Less => (s + 1) as f64 / sd,
        Ordering::Equal => 0.0,
    };

    let p_value = (2.0 * normal_sf(z.abs())).clamp(0.0, 1.0);

    Some(MannKendall {
        n,
        s,
        var_s,
        z,
        p_value,
    })
}

/// Two-sided Mann–Kendall p-value
///
/// **Public** - convenience wrapper used by the metric computation
pub fn mann_kendall_pvalue(values: &[f64]) -> Option<f64> {
    mann_kendall(values).map(|mk| mk.p_value)
}

/// Sum of sign(y[j] - y[i]) over all pairs i < j
fn s_statistic(y: &[f64]) -> i64 {
    let mut s = 0i64;
    for (i, &yi) in y.iter().enumerate() {
        for &yj in &y[i + 1..] {
            s += match yj.partial_cmp(&yi) {
                Some(Ordering::Greater) => 1,
                Some(Ordering::Less) => -1,
                _ => 0,
            };
        }
    }
    s
}

/// Σ k(k-1)(2k+5) over the multiplicity k of each distinct value
fn tie_term(y: &[f64]) -> f64 {
    let mut sorted = y.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut total = 0.0;
    let mut run = 1usize;
    for i in 1..=sorted.len() {
        if i < sorted.len() && sorted[i] == sorted[i - 1] {
            run += 1;
            continue;
        }
        let k = run as f64;
        total += k * (k - 1.0) * (2.0 * k + 5.0);
        run = 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increasing_series_is_significant() {
        let y: Vec<f64> = (1..=20).map(f64::from).collect();
        let mk = mann_kendall(&y).unwrap();
        assert_eq!(mk.s, 190);
        assert!(mk.p_value < 0.01);
        assert!(mk.z > 0.0);
    }

    #[test]
    fn test_decreasing_series_has_negative_z() {
        let y: Vec<f64> = (1..=20).rev().map(f64::from).collect();
        let mk = mann_kendall(&y).unwrap();
        assert_eq!(mk.s, -190);
        assert!(mk.z < 0.0);
        assert!(mk.p_value < 0.01);
    }

    #[test]
    fn test_constant_series_returns_one() {
        let y = vec![7.0; 12];
        assert_eq!(mann_kendall_pvalue(&y), Some(1.0));
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(mann_kendall_pvalue(&[1.0, 2.0]), None);
        assert_eq!(mann_kendall_pvalue(&[1.0, f64::NAN, 2.0]), None);
    }

    #[test]
    fn test_known_small_sample() {
        // y = [1, 3, 2, 4]: S = 4, Var = 4*3*13/18, z = 3 / sqrt(Var)
        let mk = mann_kendall(&[1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(mk.s, 4);
        let var = 4.0 * 3.0 * 13.0 / 18.0;
        assert!((mk.var_s - var).abs() < 1e-12);
        assert!((mk.z - 3.0 / var.sqrt()).abs() < 1e-12);
        // z ≈ 1.0190 -> p ≈ 0.3082
        assert!((mk.p_value - 0.3082).abs() < 1e-3);
    }

    #[test]
    fn test_tie_term() {
        // values 1 (x2), 2 (x3), 3 (x1)
        let t = tie_term(&[2.0, 1.0, 2.0, 3.0, 1.0, 2.0]);
        let expected = 2.0 * 1.0 * 9.0 + 3.0 * 2.0 * 11.0;
        assert_eq!(t, expected);
    }

    #[test]
    fn test_zero_s_gives_p_one() {
        let mk = mann_kendall(&[1.0, 2.0, 1.0]).unwrap();
        assert_eq!(mk.s, 0);
        assert!(mk.var_s > 0.0);
        assert_eq!(mk.z, 0.0);
        assert_eq!(mk.p_value, 1.0);
    }
}
