//! Locale-aware numeric parsing.
//!
//! Payslip values arrive as strings like `"1.234,5"` whose meaning depends
//! on the configured separators. Parsing never fails: unparsable input
//! degrades to NaN, which callers treat as "missing".

/// Parse a locale-formatted decimal string.
///
/// Removes every occurrence of `thousands_sep`, maps `decimal_sep` to `.`,
/// then parses as `f64`. Empty/whitespace or garbled input yields NaN.
///
/// The thousands separator is optional so the merger can re-parse its own
/// canonical `"15.5"` output without treating the `.` as a thousands mark.
pub fn parse_decimal(raw: &str, decimal_sep: char, thousands_sep: Option<char>) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }

    let mut normalized = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if Some(ch) == thousands_sep {
            continue;
        }
        if ch == decimal_sep {
            normalized.push('.');
        } else {
            normalized.push(ch);
        }
    }

    normalized.parse::<f64>().unwrap_or(f64::NAN)
}

/// True when a value contains both `,` and `.` as literal characters.
/// Such values are flagged before any normalization is attempted.
pub fn is_locale_ambiguous(raw: &str) -> bool {
    raw.contains(',') && raw.contains('.')
}

/// Canonical rendering of an hours total: `15.5`, `15`, never `15.0`.
pub fn format_hours(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn italian_locale() {
        assert_eq!(parse_decimal("1.234,5", ',', Some('.')), 1234.5);
        assert_eq!(parse_decimal("36,5", ',', Some('.')), 36.5);
        assert_eq!(parse_decimal("160", ',', Some('.')), 160.0);
    }

    #[test]
    fn english_locale() {
        assert_eq!(parse_decimal("1,234.5", '.', Some(',')), 1234.5);
    }

    #[test]
    fn separator_pair_property() {
        // "1{t}234{d}5" must parse to 1234.5 for any d != t.
        for (d, t) in [(',', '.'), ('.', ','), (',', ' '), ('.', '\'')] {
            let input = format!("1{t}234{d}5");
            assert_eq!(parse_decimal(&input, d, Some(t)), 1234.5, "input {input:?}");
        }
    }

    #[test]
    fn unparsable_degrades_to_nan() {
        assert!(parse_decimal("", ',', Some('.')).is_nan());
        assert!(parse_decimal("   ", ',', Some('.')).is_nan());
        assert!(parse_decimal("abc", ',', Some('.')).is_nan());
        assert!(parse_decimal("12,3,4", ',', Some('.')).is_nan());
    }

    #[test]
    fn no_thousands_separator_keeps_dot_as_decimal() {
        assert_eq!(parse_decimal("15.5", ',', None), 15.5);
        assert_eq!(parse_decimal("10,0", ',', None), 10.0);
    }

    #[test]
    fn ambiguity_detection() {
        assert!(is_locale_ambiguous("1.234,5"));
        assert!(is_locale_ambiguous("1,234.5"));
        assert!(!is_locale_ambiguous("1234,5"));
        assert!(!is_locale_ambiguous("1234.5"));
        assert!(!is_locale_ambiguous(""));
    }

    #[test]
    fn hours_formatting_is_canonical() {
        assert_eq!(format_hours(15.5), "15.5");
        assert_eq!(format_hours(15.0), "15");
        assert_eq!(format_hours(0.0), "0");
    }
}
