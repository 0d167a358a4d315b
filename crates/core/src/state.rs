//! Session state container.
//!
//! The single in-memory (and JSON-persisted) state the whole flow operates
//! on. Mutations go through the reducer-style methods here; rendering/CLI
//! layers read the state and carry no business logic of their own.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::classify;
use crate::error::CoreError;
use crate::fields::RowField;
use crate::merge::{merge_rows, MergeReport};
use crate::model::{
    CigGroup, CostMode, DemandKind, ExtractedRow, ParsingConfig, Period, RiskLabel, RoundingMode,
};
use crate::preset::Preset;

/// Editable role record. Numeric fields are optional; absence coerces to 0
/// (multipliers to 1) when the document is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDraft {
    pub name: String,
    #[serde(alias = "demand_kind")]
    pub demand_kind: DemandKind,
    #[serde(default, alias = "demand_value")]
    pub demand_value: Option<f64>,
    #[serde(default, alias = "rounding_step")]
    pub rounding_step: Option<f64>,
    #[serde(default)]
    pub rounding: RoundingMode,
    #[serde(default, alias = "chunk_hours")]
    pub chunk_hours: Option<f64>,
    #[serde(default, alias = "allow_last_fragment")]
    pub allow_last_fragment: bool,
    #[serde(default, alias = "last_fragment_step")]
    pub last_fragment_step: Option<f64>,
    #[serde(default, alias = "cost_mode")]
    pub cost_mode: CostMode,
    #[serde(default, alias = "cost_value")]
    pub cost_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub config_name: String,
    pub rows: Vec<ExtractedRow>,
    pub roles: Vec<RoleDraft>,
    pub networks: Vec<String>,
    pub cigs: Vec<CigGroup>,
    pub parsing: ParsingConfig,
    pub period: Period,
    pub consume_all_hours: bool,
    /// OCR-mode identifier chosen for extraction; `None` until picked.
    pub extraction_mode: Option<String>,
    /// Upload identifier returned by the extraction service.
    pub upload_id: Option<String>,
    /// Name of the uploaded source document.
    pub source_file: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            config_name: "default".into(),
            rows: Vec::new(),
            roles: Vec::new(),
            networks: Vec::new(),
            cigs: Vec::new(),
            parsing: ParsingConfig::italian(),
            period: Period::default(),
            consume_all_hours: true,
            extraction_mode: None,
            upload_id: None,
            source_file: None,
        }
    }
}

impl SessionState {
    /// Add a manually entered row with a fresh session-scoped id.
    pub fn add_row(&mut self, name: &str) -> &mut ExtractedRow {
        self.rows.push(ExtractedRow {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            role: String::new(),
            ordinary_hours: String::new(),
            overtime_hours: String::new(),
            on_call_hours: String::new(),
            net_pay: String::new(),
            garnishment: None,
            hourly_cost: None,
            source_page: None,
            method: Some("manual".into()),
            confidence: None,
            risk: None,
        });
        self.rows.last_mut().unwrap()
    }

    /// Replace the row set with service-provided rows, assigning ids where
    /// the service sent none.
    pub fn set_rows(&mut self, rows: Vec<ExtractedRow>) {
        self.rows = rows;
        for row in &mut self.rows {
            if row.id.trim().is_empty() {
                row.id = Uuid::new_v4().to_string();
            }
        }
    }

    /// Edit one field of one row through the static field table.
    pub fn set_row_field(&mut self, id: &str, field: RowField, value: &str) -> Result<(), CoreError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::UnknownRow(id.to_string()))?;
        field.set(row, value);
        // Field edits invalidate any locally computed label; upstream labels
        // assigned by the service travel in `risk` and are reapplied by the
        // caller if still wanted.
        row.risk = None;
        Ok(())
    }

    /// Effective risk of a row under the session's locale.
    pub fn row_risk(&self, row: &ExtractedRow) -> RiskLabel {
        classify(row, &self.parsing)
    }

    /// Stamp every row with its computed label (explicit labels stay put).
    pub fn reclassify_all(&mut self) {
        let parsing = self.parsing.clone();
        for row in &mut self.rows {
            let label = classify(row, &parsing);
            row.risk = Some(label);
        }
    }

    /// Deduplicate rows in place, returning the dropped-value report.
    pub fn merge_rows_in_place(&mut self) -> MergeReport {
        let (merged, report) = merge_rows(&self.rows);
        self.rows = merged;
        report
    }

    /// Load roles/networks/CIGs/parsing from a preset, leaving rows and
    /// period untouched.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.roles = preset.roles.clone();
        self.networks = preset.networks.clone();
        self.cigs = preset.cigs.clone();
        self.parsing = preset.parsing.clone();
        self.consume_all_hours = preset.consume_all_hours;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_row_assigns_unique_ids() {
        let mut state = SessionState::default();
        state.add_row("Mario Rossi");
        state.add_row("Anna Bianchi");
        assert_ne!(state.rows[0].id, state.rows[1].id);
        assert_eq!(state.rows[0].method.as_deref(), Some("manual"));
    }

    #[test]
    fn set_rows_fills_missing_ids() {
        let mut state = SessionState::default();
        let mut row = ExtractedRow {
            id: String::new(),
            name: "X".into(),
            role: String::new(),
            ordinary_hours: "1".into(),
            overtime_hours: "0".into(),
            on_call_hours: "0".into(),
            net_pay: "1".into(),
            garnishment: None,
            hourly_cost: None,
            source_page: None,
            method: None,
            confidence: None,
            risk: None,
        };
        state.set_rows(vec![row.clone()]);
        assert!(!state.rows[0].id.is_empty());

        row.id = "server-id-7".into();
        state.set_rows(vec![row]);
        assert_eq!(state.rows[0].id, "server-id-7");
    }

    #[test]
    fn editing_a_field_clears_the_stale_label() {
        let mut state = SessionState::default();
        state.add_row("Mario Rossi");
        let id = state.rows[0].id.clone();
        state.reclassify_all();
        assert_eq!(state.rows[0].risk, Some(RiskLabel::MissingData));

        for field in [
            RowField::OrdinaryHours,
            RowField::OvertimeHours,
            RowField::OnCallHours,
            RowField::NetPay,
        ] {
            state.set_row_field(&id, field, "10").unwrap();
        }
        assert_eq!(state.rows[0].risk, None);
        assert_eq!(state.row_risk(&state.rows[0]), RiskLabel::None);
    }

    #[test]
    fn set_row_field_unknown_id_errors() {
        let mut state = SessionState::default();
        let err = state.set_row_field("nope", RowField::Name, "x").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn session_round_trips_json() {
        let mut state = SessionState::default();
        state.add_row("Mario Rossi");
        state.networks = vec!["RETE1".into()];
        state.extraction_mode = Some("ocr".into());
        let json = serde_json::to_string(&state).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn apply_preset_keeps_rows_and_period() {
        let mut state = SessionState::default();
        state.add_row("Mario Rossi");
        state.period = Period::new(2025, 6);
        state.apply_preset(&Preset::builtin());
        assert_eq!(state.rows.len(), 1);
        assert_eq!(state.period.month, 6);
        assert!(!state.roles.is_empty());
        assert!(!state.networks.is_empty());
    }
}
