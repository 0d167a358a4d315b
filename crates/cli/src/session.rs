//! Session file handling.
//!
//! The whole flow operates on one JSON session file in the working
//! directory, created on first use.

use std::path::{Path, PathBuf};

use prospetti_core::SessionState;

use crate::exit_codes::EXIT_ERROR;
use crate::CliError;

pub const SESSION_FILE: &str = "prospetti.session.json";

pub fn session_path(dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(d) => d.join(SESSION_FILE),
        None => PathBuf::from(SESSION_FILE),
    }
}

/// Load the session, or start a fresh one if the file does not exist yet.
pub fn load_session(path: &Path) -> Result<SessionState, CliError> {
    if !path.exists() {
        return Ok(SessionState::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot read {}: {e}", path.display()),
        hint: None,
    })?;
    serde_json::from_str(&contents).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("corrupt session file {}: {e}", path.display()),
        hint: Some(format!("run `prospetti session reset` or delete {}", path.display())),
    })
}

pub fn save_session(path: &Path, state: &SessionState) -> Result<(), CliError> {
    let contents = serde_json::to_string_pretty(state).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot serialize session: {e}"),
        hint: None,
    })?;
    std::fs::write(path, contents).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot write {}: {e}", path.display()),
        hint: None,
    })
}
