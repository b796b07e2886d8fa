//! Output writers for the summary table.
//!
//! This module handles writing data to disk in various formats:
//! - CSV summary table (atomic replace)
//! - JSON report
//! - Text table for stdout

pub mod json;
pub mod schema;
pub mod table;
pub mod text;

// Re-export main functions
pub use json::{build_report, write_report};
pub use schema::{SummaryReport, SummaryRow, SUMMARY_COLUMNS};
pub use table::{merge_rows, read_summary, write_summary};
pub use text::format_summary_table;
