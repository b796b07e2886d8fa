//! Early-vs-late window delta.

use crate::trend::median;
use crate::utils::config::AnalysisConfig;

/// median(late window) − median(early window)
///
/// Early window: [early_start, early_end).
/// Late window: [max(warm-up, t_max − late_duration), t_max], where t_max is
/// the largest time present.
///
/// # Returns
/// `None` if either window holds no samples
pub fn early_late_delta(times: &[f64], values: &[f64], config: &AnalysisConfig) -> Option<f64> {
    let t_max = times
        .iter()
        .copied()
        .filter(|t| !t.is_nan())
        .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m| m.max(t))))?;

    let late_start = config.warmup_hours.max(t_max - config.late_duration_hours);

    let early: Vec<f64> = select(times, values, |t| {
        t >= config.early_start_hours && t < config.early_end_hours
    });
    let late: Vec<f64> = select(times, values, |t| t >= late_start && t <= t_max);

    Some(median(&late)? - median(&early)?)
}

fn select(times: &[f64], values: &[f64], keep: impl Fn(f64) -> bool) -> Vec<f64> {
    times
        .iter()
        .zip(values.iter())
        .filter(|(&t, _)| keep(t))
        .map(|(_, &v)| v)
        .collect()
}
