//! Named configuration presets.
//!
//! A preset bundles roles, networks, CIG groups and the parsing locale so
//! a session can be seeded in one step. The builtin preset carries the
//! canned CAS setup; user presets load from TOML files. Presets are plain
//! loadable records, never process-wide singletons.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{CigGroup, CostMode, DemandKind, ParsingConfig, RoundingMode};
use crate::state::RoleDraft;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub roles: Vec<RoleDraft>,
    pub networks: Vec<String>,
    #[serde(default)]
    pub cigs: Vec<CigGroup>,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default = "default_consume_all")]
    pub consume_all_hours: bool,
}

fn default_consume_all() -> bool {
    true
}

impl Preset {
    /// The canned CAS bundle: five networks, the standard role set, one
    /// consolidated CIG, Italian numeric locale.
    pub fn builtin() -> Self {
        let networks: Vec<String> = (1..=5).map(|i| format!("RETE{i}")).collect();
        Self {
            name: "cas".into(),
            roles: vec![
                role("OG", DemandKind::PerDay, 12.0, 7.5, CostMode::FromPayslip, 0.0),
                role("MEDIATORE", DemandKind::PerWeek, 20.0, 7.5, CostMode::FromPayslip, 0.0),
                role("OS", DemandKind::PerWeek, 28.0, 7.5, CostMode::FromPayslip, 0.0),
                role("DIRETTORE", DemandKind::PerWeek, 8.0, 8.0, CostMode::FromPayslip, 0.0),
                role("MEDICO", DemandKind::PerDay, 3.0, 8.0, CostMode::FixedMonthlyTotal, 0.0),
                role("REPERIBILITA", DemandKind::PerNight, 8.0, 8.0, CostMode::FixedHourly, 1.5),
            ],
            cigs: vec![CigGroup {
                name: "CIG-CAS".into(),
                networks: networks.clone(),
            }],
            networks,
            parsing: ParsingConfig::italian(),
            consume_all_hours: true,
        }
    }

    /// Parse and validate a preset from TOML.
    pub fn from_toml(input: &str) -> Result<Self, CoreError> {
        let preset: Preset =
            toml::from_str(input).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        preset.validate()?;
        Ok(preset)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("preset name must not be empty".into()));
        }
        if self.roles.is_empty() {
            return Err(CoreError::Validation("preset has no roles".into()));
        }
        for r in &self.roles {
            if r.name.trim().is_empty() {
                return Err(CoreError::Validation("role name must not be empty".into()));
            }
        }
        self.parsing.validate()?;
        Ok(())
    }
}

fn role(
    name: &str,
    demand_kind: DemandKind,
    demand_value: f64,
    chunk_hours: f64,
    cost_mode: CostMode,
    cost_value: f64,
) -> RoleDraft {
    RoleDraft {
        name: name.into(),
        demand_kind,
        demand_value: Some(demand_value),
        rounding_step: Some(0.5),
        rounding: RoundingMode::Ceiling,
        chunk_hours: Some(chunk_hours),
        allow_last_fragment: true,
        last_fragment_step: Some(0.5),
        cost_mode,
        cost_value: Some(cost_value),
    }
}
