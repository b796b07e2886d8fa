//! Canonical in-memory rows produced by the loaders.
//!
//! Downstream code only ever sees these types; nothing format-specific
//! (CSV headers, XML attribute names) leaks past the parser.

use serde::Serialize;

/// One row of the resource monitor table
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSample {
    /// Sample time (epoch milliseconds)
    pub timestamp_ms: i64,

    /// Scope tag, e.g. "project" or "container"
    pub scope: Option<String>,

    /// Component identifier, e.g. a container name or "ALL"
    pub component: Option<String>,

    /// Resource usage (e.g. memory in MiB); missing if unparseable
    pub usage: Option<f64>,
}

/// Loaded monitor table, sorted by timestamp
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    pub samples: Vec<ResourceSample>,

    /// Whether the source had a scope column
    pub has_scope: bool,

    /// Whether the source had a component column
    pub has_component: bool,
}

impl ResourceTable {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// One request from a load-test log, in either source encoding
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestRecord {
    /// Request start (epoch milliseconds)
    pub timestamp_ms: Option<f64>,

    /// Elapsed duration (milliseconds)
    pub elapsed: Option<f64>,

    pub success: bool,

    /// HTTP status; missing for non-numeric codes
    pub response_code: Option<i64>,

    pub label: Option<String>,

    pub message: Option<String>,
}

/// Encoding a request log was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEncoding {
    Csv,
    Xml,
}

impl std::fmt::Display for LogEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEncoding::Csv => f.write_str("csv"),
            LogEncoding::Xml => f.write_str("xml"),
        }
    }
}
