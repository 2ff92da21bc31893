//! Lenient numeric field parsing
//!
//! Never fails: anything that cannot be read as a finite number is `None`.

use crate::record::RawValue;

/// Literal markers the source uses for "no value" (compared case-insensitively)
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "-"];

/// Period suffixes that leak into scraped return cells
const YEAR_SUFFIXES: &[&str] = &["1Y", "3Y", "5Y"];

/// Parse a return percentage such as `"12.34%"`, `"1,234.5%"` or `"8.1%\n3Y"`
pub fn parse_percent(value: Option<&RawValue>) -> Option<f64> {
    parse_lenient(value, true)
}

/// Parse a plain number such as an expense ratio or fund size
pub fn parse_number(value: Option<&RawValue>) -> Option<f64> {
    parse_lenient(value, false)
}

fn parse_lenient(value: Option<&RawValue>, strip_year_suffix: bool) -> Option<f64> {
    let text = match value? {
        RawValue::Number(n) => return n.is_finite().then_some(*n),
        RawValue::Text(s) => s.trim(),
    };

    if text.is_empty() || is_missing_marker(text) {
        return None;
    }

    let mut cleaned = text.replace(['%', ',', '\n'], "");
    if strip_year_suffix {
        for suffix in YEAR_SUFFIXES {
            cleaned = cleaned.replace(suffix, "");
        }
    }

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn is_missing_marker(text: &str) -> bool {
    MISSING_MARKERS
        .iter()
        .any(|marker| text.eq_ignore_ascii_case(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_parse_percent_plain() {
        assert_eq!(parse_percent(Some(&text("12.34%"))), Some(12.34));
        assert_eq!(parse_percent(Some(&text("-3.5%"))), Some(-3.5));
    }

    #[test]
    fn test_parse_percent_thousands_separator() {
        assert_eq!(parse_percent(Some(&text("1,234.5%"))), Some(1234.5));
    }

    #[test]
    fn test_parse_percent_numeric_passthrough() {
        assert_eq!(parse_percent(Some(&RawValue::Number(7.0))), Some(7.0));
    }

    #[test]
    fn test_parse_percent_missing_markers() {
        for marker in ["NA", "n/a", "N/A", "-", "", "   "] {
            assert_eq!(parse_percent(Some(&text(marker))), None, "{marker:?}");
        }
        assert_eq!(parse_percent(None), None);
    }

    #[test]
    fn test_parse_percent_strips_year_suffix_and_newlines() {
        assert_eq!(parse_percent(Some(&text("18.2%\n3Y"))), Some(18.2));
        assert_eq!(parse_percent(Some(&text("5Y 22.9%"))), Some(22.9));
    }

    #[test]
    fn test_parse_percent_garbage_is_missing() {
        assert_eq!(parse_percent(Some(&text("abc"))), None);
        assert_eq!(parse_percent(Some(&text("12.3.4%"))), None);
    }

    #[test]
    fn test_non_finite_is_missing() {
        assert_eq!(parse_percent(Some(&text("inf"))), None);
        assert_eq!(parse_percent(Some(&text("NaN"))), None);
        assert_eq!(parse_number(Some(&RawValue::Number(f64::NAN))), None);
    }

    #[test]
    fn test_parse_number_keeps_year_suffix() {
        assert_eq!(parse_number(Some(&text("0.75%"))), Some(0.75));
        assert_eq!(parse_number(Some(&text("12,345"))), Some(12345.0));
        assert_eq!(parse_number(Some(&text("3Y"))), None);
        assert_eq!(parse_number(Some(&text("N/A"))), None);
    }
}
