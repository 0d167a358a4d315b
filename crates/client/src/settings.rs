//! Client settings store.
//!
//! Reads/writes ~/.config/prospetti/settings.json. A missing or invalid
//! file falls back to the default local endpoint.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Returns the path to the settings file.
pub fn settings_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("prospetti/settings.json"))
}

/// Load settings from disk, defaulting when absent or invalid.
pub fn load_settings() -> Settings {
    let Some(path) = settings_file_path() else {
        return Settings::default();
    };
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|contents| serde_json::from_str(&contents).ok())
        .unwrap_or_default()
}

/// Save settings, creating the parent directory if needed.
/// Sets 0600 permissions on Unix.
pub fn save_settings(settings: &Settings) -> Result<(), String> {
    let path = settings_file_path().ok_or("Could not determine config directory")?;
    write_settings(&path, settings)
}

fn write_settings(path: &std::path::Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {e}"))?;
    }

    let contents = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    std::fs::write(path, &contents).map_err(|e| format!("Failed to write settings: {e}"))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| format!("Failed to set file permissions: {e}"))?;
    }

    Ok(())
}
