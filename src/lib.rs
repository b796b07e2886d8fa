//! Aging Summary
//!
//! Robust trend summaries for long-running load tests. For every run
//! directory it reads the resource monitor table and the JMeter log and
//! reports, per run:
//! - resource slope (Theil–Sen) and trend significance (Mann–Kendall)
//! - binned p95 latency slope and significance
//! - early-vs-late median deltas
//! - total request errors
//!
//! ## Getting Started
//!
//! ```bash
//! aging-summary summarize --test-root ./Test --out summary.csv
//! ```

pub mod aggregator;
pub mod commands;
pub mod metrics;
pub mod output;
pub mod parser;
pub mod trend;
pub mod utils;
