//! Export gate.
//!
//! Go/no-go decision for handing the session to the compute/export
//! service. Advisory only: the export control is disabled while blocking
//! issues exist, but the server remains the authoritative validator.

use crate::model::Network;
use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReadiness {
    pub has_blocking_issues: bool,
    /// Every unmet prerequisite, reported independently, stable order.
    pub missing_items: Vec<String>,
    /// Soft issues that do not block: dangling CIG network references.
    pub warnings: Vec<String>,
}

/// Evaluate export readiness. Checks are never short-circuited: when
/// several prerequisites are unmet at once, each one is listed.
pub fn readiness(state: &SessionState) -> ExportReadiness {
    let mut missing = Vec::new();

    let risky = state
        .rows
        .iter()
        .filter(|r| state.row_risk(r) != crate::model::RiskLabel::None)
        .count();
    if risky > 0 {
        missing.push(format!("{risky} row(s) still carry unresolved risks"));
    }

    if state.roles.is_empty() {
        missing.push("no roles configured".into());
    }

    let networks: Vec<&str> = state
        .networks
        .iter()
        .filter_map(|n| {
            let t = n.trim();
            (!t.is_empty()).then_some(t)
        })
        .collect();
    if networks.is_empty() {
        missing.push("no networks configured".into());
    }

    if state.cigs.is_empty() {
        missing.push("no CIG groups configured".into());
    }

    if state.extraction_mode.is_none() {
        missing.push("no extraction mode selected".into());
    }

    if state.upload_id.is_none() && state.source_file.is_none() {
        missing.push("no source document uploaded".into());
    }

    let mut warnings = Vec::new();
    for cig in &state.cigs {
        for referenced in &cig.networks {
            let known = Network::parse(referenced)
                .map(|n| networks.contains(&n.name()))
                .unwrap_or(false);
            if !known {
                warnings.push(format!(
                    "CIG '{}' references unknown network '{}'",
                    cig.name, referenced
                ));
            }
        }
    }

    ExportReadiness {
        has_blocking_issues: !missing.is_empty(),
        missing_items: missing,
        warnings,
    }
}
