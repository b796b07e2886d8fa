//! Forgiving per-field coercion.
//!
//! Every loader goes through these helpers so that a malformed cell turns
//! into a missing value instead of failing the row or the file.

use crate::utils::config::TRUTHY_VALUES;

/// Trimmed, non-empty view of a raw cell
fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a float, or `None` if the cell is empty or not a finite number
pub fn parse_f64_or_missing(raw: Option<&str>) -> Option<f64> {
    non_empty(raw)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse an integer, or `None` if the cell is empty or not integral
///
/// Integral floats (`"200.0"`, `"1.7e12"`) are accepted since CSV writers
/// widen integer columns to floats once a value is missing.
pub fn parse_i64_or_missing(raw: Option<&str>) -> Option<i64> {
    let s = non_empty(raw)?;
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }

    let v = s.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Interpret a success flag; anything outside the truthy set is false
pub fn parse_bool_flag(raw: Option<&str>) -> bool {
    match non_empty(raw) {
        Some(s) => TRUTHY_VALUES.iter().any(|t| s.eq_ignore_ascii_case(t)),
        None => false,
    }
}

/// Optional free text, trimmed; empty becomes `None`
pub fn parse_text(raw: Option<&str>) -> Option<String> {
    non_empty(raw).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64_or_missing(Some(" 12.5 ")), Some(12.5));
        assert_eq!(parse_f64_or_missing(Some("")), None);
        assert_eq!(parse_f64_or_missing(Some("abc")), None);
        assert_eq!(parse_f64_or_missing(Some("NaN")), None);
        assert_eq!(parse_f64_or_missing(None), None);
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64_or_missing(Some("200")), Some(200));
        assert_eq!(parse_i64_or_missing(Some("200.0")), Some(200));
        assert_eq!(parse_i64_or_missing(Some("1.7e12")), Some(1_700_000_000_000));
        assert_eq!(parse_i64_or_missing(Some("200.5")), None);
        assert_eq!(
            parse_i64_or_missing(Some("Non HTTP response code: java.net.SocketException")),
            None
        );
        assert_eq!(parse_i64_or_missing(None), None);
    }

    #[test]
    fn test_parse_bool_flag() {
        for truthy in ["true", "TRUE", "True", "1", "yes", "Y", " y "] {
            assert!(parse_bool_flag(Some(truthy)), "{truthy} should be true");
        }
        for falsy in ["false", "0", "no", "", "t", "ok"] {
            assert!(!parse_bool_flag(Some(falsy)), "{falsy} should be false");
        }
        assert!(!parse_bool_flag(None));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_text(Some(" HTTP Request ")), Some("HTTP Request".to_string()));
        assert_eq!(parse_text(Some("   ")), None);
    }
}
