//! Service HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). One in-flight
//! request per user action; no retry, no cancellation. Non-2xx bodies are
//! plain text and surfaced verbatim.

use std::time::Duration;

use prospetti_core::{ConfigDocument, ExtractedRow, ParsingConfig};

use crate::error::ApiError;
use crate::types::{ComputeResponse, ExtractResponse};

/// Client for the extraction/compute/export service (blocking).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

impl ApiClient {
    pub fn new(api_base: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("prospetti/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }

        Ok(Self { http, api_base })
    }

    /// Upload a source document for extraction.
    ///
    /// Multipart POST: the file, the OCR-mode identifier, and the parsing
    /// configuration as a JSON-encoded text part.
    pub fn extract(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mode: &str,
        parsing: &ParsingConfig,
    ) -> Result<ExtractResponse, ApiError> {
        let parsing_json =
            serde_json::to_string(parsing).map_err(|e| ApiError::Parse(e.to_string()))?;

        let form = reqwest::blocking::multipart::Form::new()
            .part(
                "file",
                reqwest::blocking::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
            )
            .text("mode", mode.to_string())
            .text("parsing", parsing_json);

        let url = format!("{}/api/extract", self.api_base);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = check_status(response)?;
        response
            .json::<ExtractResponse>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch the server's canonical row set for an upload.
    pub fn fetch_rows(&self, upload_id: &str) -> Result<Vec<ExtractedRow>, ApiError> {
        let url = format!("{}/api/uploads/{}/rows", self.api_base, upload_id);
        let response = self.get(&url)?;
        let json: serde_json::Value =
            response.json().map_err(|e| ApiError::Parse(e.to_string()))?;

        // Rows may arrive bare or wrapped; absent means empty.
        let rows = json
            .get("rows")
            .cloned()
            .unwrap_or(serde_json::Value::Array(Vec::new()));
        serde_json::from_value(rows).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Persist the locally edited row set, risk labels included.
    pub fn save_rows(&self, upload_id: &str, rows: &[ExtractedRow]) -> Result<(), ApiError> {
        let url = format!("{}/api/uploads/{}/rows", self.api_base, upload_id);
        self.post_json(&url, &serde_json::json!({ "rows": rows }))?;
        Ok(())
    }

    /// Save a named configuration document.
    pub fn save_config(&self, document: &ConfigDocument) -> Result<(), ApiError> {
        let url = format!("{}/api/configs", self.api_base);
        let body = serde_json::to_value(document).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.post_json(&url, &body)?;
        Ok(())
    }

    /// Retrieve a configuration document by name.
    pub fn fetch_config(&self, name: &str) -> Result<ConfigDocument, ApiError> {
        let url = format!("{}/api/configs/{}", self.api_base, name);
        let response = self.get(&url)?;
        response
            .json::<ConfigDocument>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Run the allocation computation server-side.
    pub fn compute(
        &self,
        upload_id: &str,
        document: &ConfigDocument,
        rows: &[ExtractedRow],
    ) -> Result<ComputeResponse, ApiError> {
        let url = format!("{}/api/compute", self.api_base);
        let body = serde_json::json!({
            "uploadId": upload_id,
            "config": document,
            "rows": rows,
        });
        let response = self.post_json(&url, &body)?;
        response
            .json::<ComputeResponse>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Download the exported spreadsheet as raw bytes.
    pub fn export(&self, upload_id: &str, config_name: Option<&str>) -> Result<Vec<u8>, ApiError> {
        let mut request = self
            .http
            .get(format!("{}/api/export", self.api_base))
            .query(&[("uploadId", upload_id)]);
        if let Some(name) = config_name {
            request = request.query(&[("config", name)]);
        }

        let response = request.send().map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check_status(response)?;
        let bytes = response.bytes().map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response)
    }

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response)
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ApiError::Http(status, body));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let client = ApiClient::new("http://localhost:8000///").unwrap();
        assert_eq!(client.api_base, "http://localhost:8000");
    }
}
