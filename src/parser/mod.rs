//! Artifact loading and canonical row definitions.
//!
//! This module handles:
//! - Reading the resource monitor CSV
//! - Reading JMeter logs in CSV or XML form
//! - Forgiving per-field coercion shared by both loaders

pub mod coerce;
pub mod jtl;
pub mod monitor;
pub mod schema;

// Re-export main types
pub use jtl::{load_request_log, parse_request_log};
pub use monitor::{load_resource_table, parse_resource_csv};
pub use schema::{LogEncoding, RequestRecord, ResourceSample, ResourceTable};
