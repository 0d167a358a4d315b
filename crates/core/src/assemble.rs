//! Document assembly.
//!
//! Pure projection of session state into the configuration contract the
//! compute/export service consumes. Same state in, structurally identical
//! document out.

use crate::model::{ConfigDocument, LocaleBlock, Network, Period, Role, DOCUMENT_VERSION};
use crate::state::{RoleDraft, SessionState};

/// Build the configuration document from current state.
///
/// Coercions: absent numeric fields become 0, absent period multipliers
/// become 1. Blank network names are dropped. CIG network lists pass
/// through verbatim; cross-checking them against the network list is the
/// export gate's job.
pub fn assemble(state: &SessionState) -> ConfigDocument {
    ConfigDocument {
        version: DOCUMENT_VERSION,
        name: state.config_name.clone(),
        period: Period {
            year: state.period.year,
            month: state.period.month,
            day_multiplier: Some(state.period.day_multiplier.unwrap_or(1.0)),
            week_multiplier: Some(state.period.week_multiplier.unwrap_or(1.0)),
            night_multiplier: Some(state.period.night_multiplier.unwrap_or(1.0)),
        },
        locale: LocaleBlock {
            decimal_separator: state.parsing.decimal_separator,
            thousands_separator: state.parsing.thousands_separator,
            patterns: state.parsing.patterns.clone(),
        },
        roles: state.roles.iter().map(finalize_role).collect(),
        networks: state
            .networks
            .iter()
            .filter_map(|n| Network::parse(n))
            .map(|n| n.name().to_string())
            .collect(),
        cigs: state.cigs.clone(),
        consume_all_hours: state.consume_all_hours,
    }
}

fn finalize_role(draft: &RoleDraft) -> Role {
    Role {
        name: draft.name.clone(),
        demand_kind: draft.demand_kind,
        demand_value: draft.demand_value.unwrap_or(0.0),
        rounding_step: draft.rounding_step.unwrap_or(0.0),
        rounding: draft.rounding,
        chunk_hours: draft.chunk_hours.unwrap_or(0.0),
        allow_last_fragment: draft.allow_last_fragment,
        last_fragment_step: draft.last_fragment_step.unwrap_or(0.0),
        cost_mode: draft.cost_mode,
        cost_value: draft.cost_value.unwrap_or(0.0),
    }
}
