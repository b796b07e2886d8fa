//! Non-parametric trend estimators.
//!
//! This module provides:
//! - Mann–Kendall monotonic-trend significance test
//! - Theil–Sen robust slope
//! - Order statistics (median, percentile) and the normal tail they rely on

pub mod descriptive;
pub mod mann_kendall;
pub mod theil_sen;

// Re-export main types and functions
pub use descriptive::{median, normal_cdf, normal_sf, percentile};
pub use mann_kendall::{mann_kendall, mann_kendall_pvalue, MannKendall};
pub use theil_sen::theil_sen_slope;
