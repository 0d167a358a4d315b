//! `prospetti-client` — HTTP client for the extraction/compute/export
//! service, shared between the CLI and any future desktop surface.

pub mod client;
pub mod error;
pub mod settings;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use settings::{load_settings, save_settings, settings_file_path, Settings};
pub use types::{ComputeResponse, ConfidenceEntry, ExtractResponse};
