//! Risk classification for extracted rows.
//!
//! Ordered rules, first match wins. The ordering is a contract: a row that
//! is both missing a field and out of range reports missing-data.

use crate::model::{ExtractedRow, ParsingConfig, RiskLabel};
use crate::numeric::{is_locale_ambiguous, parse_decimal};

/// Upper bound for plausible monthly ordinary/overtime hours.
pub const MAX_MONTHLY_HOURS: f64 = 320.0;

/// Extraction confidence below this is flagged.
pub const MIN_CONFIDENCE: f64 = 0.75;

/// Classify a row. An explicit upstream label is returned verbatim,
/// including an explicit `none`; local rules are a fallback, never an
/// override.
pub fn classify(row: &ExtractedRow, parsing: &ParsingConfig) -> RiskLabel {
    if let Some(label) = row.risk {
        return label;
    }

    let required = [
        &row.ordinary_hours,
        &row.overtime_hours,
        &row.on_call_hours,
        &row.net_pay,
    ];

    if required.iter().any(|v| v.trim().is_empty()) {
        return RiskLabel::MissingData;
    }

    if required.iter().any(|v| is_locale_ambiguous(v)) {
        return RiskLabel::AmbiguousSeparator;
    }

    for value in [&row.ordinary_hours, &row.overtime_hours] {
        let hours = parse_decimal(
            value,
            parsing.decimal_separator,
            Some(parsing.thousands_separator),
        );
        if !(0.0..=MAX_MONTHLY_HOURS).contains(&hours) {
            return RiskLabel::OutOfRange;
        }
    }

    if let Some(confidence) = row.confidence {
        if confidence < MIN_CONFIDENCE {
            return RiskLabel::LowConfidence;
        }
    }

    RiskLabel::None
}
