//! Row deduplication by person identity.
//!
//! Hour fields are summed; everything else is retained from the first row
//! per key. Summing parses with comma as the decimal separator and no
//! thousands separator, so canonical totals like `"15.5"` re-parse to the
//! same value and the merge is idempotent.

use std::collections::HashMap;

use crate::model::ExtractedRow;
use crate::numeric::{format_hours, parse_decimal};

/// A non-hour value silently lost in a merge: the duplicate row carried a
/// different value than the seed row kept. Surfaced so callers can warn
/// instead of hiding the data loss.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedValue {
    pub merge_key: String,
    pub field: &'static str,
    pub kept: String,
    pub discarded: String,
}

#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub dropped: Vec<DroppedValue>,
}

/// Merge rows sharing a merge key (trimmed, lowercased name).
///
/// Rows with an empty key pass through untouched and never merge with each
/// other. Output preserves first-seen order. `merge(merge(rows))` equals
/// `merge(rows)`.
pub fn merge_rows(rows: &[ExtractedRow]) -> (Vec<ExtractedRow>, MergeReport) {
    let mut merged: Vec<ExtractedRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut report = MergeReport::default();

    for row in rows {
        let key = row.merge_key();
        if key.is_empty() {
            merged.push(row.clone());
            continue;
        }

        match index.get(&key) {
            None => {
                index.insert(key, merged.len());
                merged.push(row.clone());
            }
            Some(&i) => {
                let seed = &mut merged[i];
                add_hours(&mut seed.ordinary_hours, &row.ordinary_hours);
                add_hours(&mut seed.overtime_hours, &row.overtime_hours);
                add_hours(&mut seed.on_call_hours, &row.on_call_hours);
                // The seed's hour fields just changed; a label stamped before
                // the merge no longer describes them. Classification of the
                // merged row starts from scratch.
                seed.risk = None;

                note_dropped(&mut report, &key, "netPay", &seed.net_pay, &row.net_pay);
                if let (Some(kept), Some(discarded)) = (&seed.hourly_cost, &row.hourly_cost) {
                    note_dropped(&mut report, &key, "hourlyCost", kept, discarded);
                }
                if let (Some(kept), Some(discarded)) = (&seed.garnishment, &row.garnishment) {
                    note_dropped(&mut report, &key, "garnishment", kept, discarded);
                }
            }
        }
    }

    (merged, report)
}

fn add_hours(total: &mut String, incoming: &str) {
    let a = non_nan(parse_decimal(total, ',', None));
    let b = non_nan(parse_decimal(incoming, ',', None));
    *total = format_hours(a + b);
}

fn non_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

fn note_dropped(report: &mut MergeReport, key: &str, field: &'static str, kept: &str, discarded: &str) {
    if kept != discarded {
        report.dropped.push(DroppedValue {
            merge_key: key.to_string(),
            field,
            kept: kept.to_string(),
            discarded: discarded.to_string(),
        });
    }
}
