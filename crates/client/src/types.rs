//! Wire types for service responses.
//!
//! Optional arrays default to empty: an absent `rows` or `warnings` key is
//! data-shape tolerance, not an error.

use serde::{Deserialize, Serialize};

use prospetti_core::ExtractedRow;

/// Response of the extraction call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    #[serde(default)]
    pub upload_id: Option<String>,
    #[serde(default)]
    pub rows: Vec<ExtractedRow>,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Per-field confidence log, when the service recorded one.
    #[serde(default)]
    pub confidence_log: Vec<ConfidenceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceEntry {
    pub field: String,
    pub confidence: f64,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Response of the compute call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    #[serde(default)]
    pub allocations: Vec<serde_json::Value>,
    #[serde(default)]
    pub pivot: Vec<serde_json::Value>,
    #[serde(default)]
    pub check: Vec<serde_json::Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
}
