use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One payroll-hours row as produced by the extraction service.
///
/// Numeric fields stay locale-formatted strings until the parser touches
/// them; user edits mutate them in place. Wire format is camelCase, the
/// Rust side stays snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub ordinary_hours: String,
    pub overtime_hours: String,
    pub on_call_hours: String,
    pub net_pay: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garnishment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Upstream-assigned risk label. When present it is authoritative and
    /// local classification rules are skipped entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLabel>,
}

impl ExtractedRow {
    /// Key used to deduplicate rows: trimmed, case-folded name.
    /// Empty keys are never merged.
    pub fn merge_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Validation outcome for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLabel {
    None,
    MissingData,
    AmbiguousSeparator,
    OutOfRange,
    LowConfidence,
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::MissingData => write!(f, "missing-data"),
            Self::AmbiguousSeparator => write!(f, "ambiguous-separator"),
            Self::OutOfRange => write!(f, "out-of-range"),
            Self::LowConfidence => write!(f, "low-confidence"),
        }
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// How a role's staffing demand is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandKind {
    PerDay,
    PerWeek,
    PerNight,
    PerMonth,
    FixedPerNetwork,
}

impl std::fmt::Display for DemandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerDay => write!(f, "per_day"),
            Self::PerWeek => write!(f, "per_week"),
            Self::PerNight => write!(f, "per_night"),
            Self::PerMonth => write!(f, "per_month"),
            Self::FixedPerNetwork => write!(f, "fixed_per_network"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    #[default]
    Ceiling,
    Floor,
    Nearest,
}

/// How a person's hourly cost is determined for this role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    #[default]
    FromPayslip,
    FixedHourly,
    FixedMonthlyTotal,
    ManualPerPerson,
}

/// Canonical role record inside the assembled document.
/// All numeric fields are already coerced; drafts live in [`crate::state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    pub demand_kind: DemandKind,
    pub demand_value: f64,
    pub rounding_step: f64,
    pub rounding: RoundingMode,
    pub chunk_hours: f64,
    pub allow_last_fragment: bool,
    pub last_fragment_step: f64,
    pub cost_mode: CostMode,
    pub cost_value: f64,
}

// ---------------------------------------------------------------------------
// Networks and CIG groups
// ---------------------------------------------------------------------------

/// An operational site/unit. Identity is the trimmed, non-empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network(String);

impl Network {
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Administrative grouping of networks for consolidated reporting.
///
/// The network list is carried verbatim; whether every referenced network
/// exists is a soft precondition checked by the export gate, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CigGroup {
    pub name: String,
    pub networks: Vec<String>,
}

// ---------------------------------------------------------------------------
// Parsing configuration
// ---------------------------------------------------------------------------

/// Extraction patterns plus the numeric locale. Patterns are opaque to this
/// crate and only forwarded to the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingConfig {
    #[serde(default)]
    pub patterns: std::collections::BTreeMap<String, String>,
    /// snake_case aliases keep hand-written TOML presets readable.
    #[serde(alias = "decimal_separator")]
    pub decimal_separator: char,
    #[serde(alias = "thousands_separator")]
    pub thousands_separator: char,
}

impl ParsingConfig {
    /// Italian payslip locale: `1.234,5`.
    pub fn italian() -> Self {
        Self {
            patterns: std::collections::BTreeMap::new(),
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.decimal_separator == self.thousands_separator {
            return Err(CoreError::SeparatorConflict {
                decimal: self.decimal_separator,
                thousands: self.thousands_separator,
            });
        }
        Ok(())
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self::italian()
    }
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// The payroll month plus the multipliers demand calculations use.
/// Multipliers left unset default to 1 at assembly time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub year: i32,
    pub month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_multiplier: Option<f64>,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            day_multiplier: None,
            week_multiplier: None,
            night_multiplier: None,
        }
    }

    /// Calendar days in the period's month, or 0 for an invalid month.
    pub fn days_in_month(&self) -> u32 {
        let first = match chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d,
            None => return 0,
        };
        let next = if self.month == 12 {
            chrono::NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            chrono::NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match next {
            Some(n) => n.signed_duration_since(first).num_days() as u32,
            None => 0,
        }
    }

    /// Fractional weeks in the month (days / 7).
    pub fn weeks_in_month(&self) -> f64 {
        f64::from(self.days_in_month()) / 7.0
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::new(2024, 1)
    }
}

// ---------------------------------------------------------------------------
// Assembled document
// ---------------------------------------------------------------------------

/// Schema version of [`ConfigDocument`].
pub const DOCUMENT_VERSION: u32 = 1;

/// The canonical configuration contract exchanged with the compute/export
/// service. A pure projection of session state: no hidden fields, no
/// incidental ordering nondeterminism (everything is a `Vec` or `BTreeMap`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    pub version: u32,
    pub name: String,
    pub period: Period,
    pub locale: LocaleBlock,
    pub roles: Vec<Role>,
    pub networks: Vec<String>,
    pub cigs: Vec<CigGroup>,
    pub consume_all_hours: bool,
}

/// Locale block inside the document: separators plus the opaque patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleBlock {
    pub decimal_separator: char,
    pub thousands_separator: char,
    #[serde(default)]
    pub patterns: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_label_wire_names_are_kebab_case() {
        let json = serde_json::to_string(&RiskLabel::MissingData).unwrap();
        assert_eq!(json, "\"missing-data\"");
        let parsed: RiskLabel = serde_json::from_str("\"ambiguous-separator\"").unwrap();
        assert_eq!(parsed, RiskLabel::AmbiguousSeparator);
    }

    #[test]
    fn row_round_trips_camel_case() {
        let json = r#"{
            "id": "r1",
            "name": "Mario Rossi",
            "role": "OS",
            "ordinaryHours": "160,0",
            "overtimeHours": "4",
            "onCallHours": "0",
            "netPay": "1.250,00",
            "sourcePage": 3,
            "confidence": 0.91
        }"#;
        let row: ExtractedRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.ordinary_hours, "160,0");
        assert_eq!(row.source_page, Some(3));
        assert!(row.risk.is_none());

        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["netPay"], "1.250,00");
        assert_eq!(back["onCallHours"], "0");
        // Absent optionals stay off the wire
        assert!(back.get("garnishment").is_none());
    }

    #[test]
    fn merge_key_trims_and_folds_case() {
        let row = ExtractedRow {
            id: "r1".into(),
            name: "  MARIO Rossi ".into(),
            role: String::new(),
            ordinary_hours: String::new(),
            overtime_hours: String::new(),
            on_call_hours: String::new(),
            net_pay: String::new(),
            garnishment: None,
            hourly_cost: None,
            source_page: None,
            method: None,
            confidence: None,
            risk: None,
        };
        assert_eq!(row.merge_key(), "mario rossi");
    }

    #[test]
    fn network_rejects_blank_names() {
        assert!(Network::parse("   ").is_none());
        assert_eq!(Network::parse(" RETE1 ").unwrap().name(), "RETE1");
    }

    #[test]
    fn parsing_config_rejects_equal_separators() {
        let mut config = ParsingConfig::italian();
        assert!(config.validate().is_ok());
        config.thousands_separator = ',';
        assert!(config.validate().is_err());
    }

    #[test]
    fn period_month_lengths() {
        assert_eq!(Period::new(2024, 2).days_in_month(), 29);
        assert_eq!(Period::new(2023, 2).days_in_month(), 28);
        assert_eq!(Period::new(2024, 12).days_in_month(), 31);
        assert_eq!(Period::new(2024, 13).days_in_month(), 0);
        assert!((Period::new(2024, 2).weeks_in_month() - 29.0 / 7.0).abs() < 1e-9);
    }
}
