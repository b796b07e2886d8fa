//! Theil–Sen robust slope estimator.
//!
//! The slope is the median of all pairwise slopes, so a single spike can only
//! move the estimate by shifting the median rank, never by its magnitude.

use super::descriptive::median;

/// Estimate the slope of `y` against `x`
///
/// **Public** - main entry point for robust slope estimation
///
/// # Arguments
/// * `x` - Independent variable (e.g. elapsed hours)
/// * `y` - Dependent variable, parallel to `x`
///
/// # Returns
/// Median of (y[j] - y[i]) / (x[j] - x[i]) over pairs with distinct x.
/// `None` if fewer than 2 points survive NaN removal, or if every
/// surviving point shares the same x.
pub fn theil_sen_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    let points: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| !xi.is_nan() && !yi.is_nan())
        .map(|(&xi, &yi)| (xi, yi))
        .collect();

    if points.len() < 2 {
        return None;
    }

    let slopes = pairwise_slopes(&points);
    if slopes.is_empty() {
        return None;
    }

    median(&slopes)
}

/// All finite pairwise slopes; pairs with equal x are skipped
fn pairwise_slopes(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut slopes = Vec::with_capacity(n * (n - 1) / 2);

    for (i, &(xi, yi)) in points.iter().enumerate() {
        for &(xj, yj) in &points[i + 1..] {
            let dx = xj - xi;
            if dx == 0.0 {
                continue;
            }
            slopes.push((yj - yi) / dx);
        }
    }

    slopes
}
