//! Static field table for [`ExtractedRow`].
//!
//! Form/CLI edits bind to rows through this enum instead of string-keyed
//! dynamic access, so every editable field is compile-time known.

use std::str::FromStr;

use crate::error::CoreError;
use crate::model::ExtractedRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Name,
    Role,
    OrdinaryHours,
    OvertimeHours,
    OnCallHours,
    NetPay,
    Garnishment,
    HourlyCost,
}

impl RowField {
    pub const ALL: [RowField; 8] = [
        Self::Name,
        Self::Role,
        Self::OrdinaryHours,
        Self::OvertimeHours,
        Self::OnCallHours,
        Self::NetPay,
        Self::Garnishment,
        Self::HourlyCost,
    ];

    /// Wire/CLI name, matching the row's camelCase JSON keys.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Role => "role",
            Self::OrdinaryHours => "ordinaryHours",
            Self::OvertimeHours => "overtimeHours",
            Self::OnCallHours => "onCallHours",
            Self::NetPay => "netPay",
            Self::Garnishment => "garnishment",
            Self::HourlyCost => "hourlyCost",
        }
    }

    pub fn get(&self, row: &ExtractedRow) -> String {
        match self {
            Self::Name => row.name.clone(),
            Self::Role => row.role.clone(),
            Self::OrdinaryHours => row.ordinary_hours.clone(),
            Self::OvertimeHours => row.overtime_hours.clone(),
            Self::OnCallHours => row.on_call_hours.clone(),
            Self::NetPay => row.net_pay.clone(),
            Self::Garnishment => row.garnishment.clone().unwrap_or_default(),
            Self::HourlyCost => row.hourly_cost.clone().unwrap_or_default(),
        }
    }

    /// Set the field in place. Empty input clears optional fields.
    pub fn set(&self, row: &mut ExtractedRow, value: &str) {
        match self {
            Self::Name => row.name = value.to_string(),
            Self::Role => row.role = value.to_string(),
            Self::OrdinaryHours => row.ordinary_hours = value.to_string(),
            Self::OvertimeHours => row.overtime_hours = value.to_string(),
            Self::OnCallHours => row.on_call_hours = value.to_string(),
            Self::NetPay => row.net_pay = value.to_string(),
            Self::Garnishment => row.garnishment = optional(value),
            Self::HourlyCost => row.hourly_cost = optional(value),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl FromStr for RowField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|f| f.wire_name() == s)
            .copied()
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for RowField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
