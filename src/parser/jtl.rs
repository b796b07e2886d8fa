//! Loader for JMeter result logs (`jmeter_results.jtl`).
//!
//! JMeter writes either:
//! - CSV (when configured explicitly), or
//! - XML with one `<httpSample>`/`<sample>` element per request
//!
//! CSV is tried first; XML is the fallback. Both end up as `RequestRecord`.

use super::coerce::{parse_bool_flag, parse_f64_or_missing, parse_i64_or_missing, parse_text};
use super::monitor::column_index;
use super::schema::{LogEncoding, RequestRecord};
use crate::utils::config::{
    JTL_ELAPSED_FIELD, JTL_LABEL_FIELD, JTL_MESSAGE_FIELD, JTL_RESPONSE_CODE_FIELD,
    JTL_SAMPLE_ELEMENTS, JTL_SUCCESS_FIELD, JTL_TIMESTAMP_FIELD,
};
use crate::utils::error::LoadError;
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Load a request log in whichever encoding it uses
///
/// **Public** - main entry point for request logs
///
/// # Returns
/// The rows plus the encoding that produced them
///
/// # Errors
/// * `LoadError::Io` - file cannot be read
/// * `LoadError::Unparseable` - neither CSV nor XML yields a row
pub fn load_request_log(
    path: impl AsRef<Path>,
) -> Result<(Vec<RequestRecord>, LogEncoding), LoadError> {
    let path = path.as_ref();
    debug!("Reading request log: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_request_log(&content, path)
}

/// Parse request-log text, trying CSV then XML
///
/// **Public** - `origin` is only used in error messages
pub fn parse_request_log(
    content: &str,
    origin: &Path,
) -> Result<(Vec<RequestRecord>, LogEncoding), LoadError> {
    if let Some(rows) = parse_request_csv(content) {
        debug!("Parsed {} requests as CSV", rows.len());
        return Ok((rows, LogEncoding::Csv));
    }

    let rows = parse_request_xml(content).map_err(|e| LoadError::Unparseable {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })?;

    if rows.is_empty() {
        return Err(LoadError::Unparseable {
            path: origin.to_path_buf(),
            reason: "no JMeter sample nodes found".to_string(),
        });
    }

    debug!("Parsed {} requests as XML", rows.len());
    Ok((rows, LogEncoding::Xml))
}

/// Tabular encoding
///
/// **Private** - `None` unless the header has timeStamp, elapsed and
/// success and at least one row was read
fn parse_request_csv(content: &str) -> Option<Vec<RequestRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().ok()?.clone();

    let ts_idx = column_index(&headers, &[JTL_TIMESTAMP_FIELD])?;
    let elapsed_idx = column_index(&headers, &[JTL_ELAPSED_FIELD])?;
    let success_idx = column_index(&headers, &[JTL_SUCCESS_FIELD])?;
    let code_idx = column_index(&headers, &[JTL_RESPONSE_CODE_FIELD]);
    let label_idx = column_index(&headers, &[JTL_LABEL_FIELD]);
    let message_idx = column_index(&headers, &[JTL_MESSAGE_FIELD]);

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable request row {}: {}", line + 1, e);
                continue;
            }
        };

        rows.push(RequestRecord {
            timestamp_ms: parse_f64_or_missing(record.get(ts_idx)),
            elapsed: parse_f64_or_missing(record.get(elapsed_idx)),
            success: parse_bool_flag(record.get(success_idx)),
            response_code: code_idx.and_then(|i| parse_i64_or_missing(record.get(i))),
            label: label_idx.and_then(|i| parse_text(record.get(i))),
            message: message_idx.and_then(|i| parse_text(record.get(i))),
        });
    }

    if rows.is_empty() {
        debug!("CSV header matched but no rows were read; trying XML");
        return None;
    }

    Some(rows)
}

/// Markup encoding: one row per sample element, nested ones included
///
/// **Private** - internal helper for parse_request_log
fn parse_request_xml(content: &str) -> Result<Vec<RequestRecord>, LoadError> {
    let mut reader = Reader::from_str(content);
    let mut rows = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if is_sample_element(&e) {
                    rows.push(record_from_element(&e)?);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(LoadError::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(rows)
}

fn is_sample_element(element: &BytesStart<'_>) -> bool {
    let name = element.name();
    JTL_SAMPLE_ELEMENTS
        .iter()
        .any(|tag| name.as_ref() == tag.as_bytes())
}

/// Read the typed attributes of one sample element
///
/// **Private** - ts, t, s, rc, lb, rm; unknown attributes are ignored
fn record_from_element(element: &BytesStart<'_>) -> Result<RequestRecord, LoadError> {
    let mut ts = None;
    let mut t = None;
    let mut s = None;
    let mut rc = None;
    let mut lb = None;
    let mut rm = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| LoadError::Xml(e.to_string()))?;
        let slot = match attr.key.as_ref() {
            b"ts" => &mut ts,
            b"t" => &mut t,
            b"s" => &mut s,
            b"rc" => &mut rc,
            b"lb" => &mut lb,
            b"rm" => &mut rm,
            _ => continue,
        };
        let value = attr
            .unescape_value()
            .map_err(|e| LoadError::Xml(e.to_string()))?;
        *slot = Some(value.into_owned());
    }

    Ok(RequestRecord {
        timestamp_ms: parse_f64_or_missing(ts.as_deref()),
        elapsed: parse_f64_or_missing(t.as_deref()),
        success: parse_bool_flag(s.as_deref()),
        response_code: parse_i64_or_missing(rc.as_deref()),
        label: parse_text(lb.as_deref()),
        message: parse_text(rm.as_deref()),
    })
}
