//! `prospetti compute` / `prospetti export` — server-side allocation run
//! and spreadsheet download.

use std::path::PathBuf;

use prospetti_core::{assemble, readiness};

use crate::exit_codes::{EXIT_ERROR, EXIT_NOT_READY, EXIT_USAGE};
use crate::session::load_session;
use crate::{CliError, Ctx};

pub fn cmd_compute(ctx: &Ctx, json: bool) -> Result<(), CliError> {
    let state = load_session(&ctx.session_path)?;
    let upload_id = require_upload(&state)?;
    let document = assemble(&state);

    let response = ctx.client()?.compute(&upload_id, &document, &state.rows)?;

    if json {
        let value = serde_json::json!({
            "allocations": response.allocations,
            "pivot": response.pivot,
            "check": response.check,
            "warnings": response.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&value).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        })?);
        return Ok(());
    }

    for warning in &response.warnings {
        eprintln!("warning: {warning}");
    }
    println!(
        "computed: {} allocation(s), {} pivot row(s), {} check row(s)",
        response.allocations.len(),
        response.pivot.len(),
        response.check.len()
    );
    Ok(())
}

pub fn cmd_export(ctx: &Ctx, output: Option<PathBuf>) -> Result<(), CliError> {
    let state = load_session(&ctx.session_path)?;

    let report = readiness(&state);
    if report.has_blocking_issues {
        return Err(CliError {
            code: EXIT_NOT_READY,
            message: format!("{} blocking issue(s)", report.missing_items.len()),
            hint: Some("run `prospetti check` for the full list".into()),
        });
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    let upload_id = require_upload(&state)?;
    let bytes = ctx
        .client()?
        .export(&upload_id, Some(state.config_name.as_str()))?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "prospetti_{}_{:02}.xlsx",
            state.period.year, state.period.month
        ))
    });
    std::fs::write(&path, &bytes).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot write {}: {e}", path.display()),
        hint: None,
    })?;

    println!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn require_upload(state: &prospetti_core::SessionState) -> Result<String, CliError> {
    state.upload_id.clone().ok_or_else(|| CliError {
        code: EXIT_USAGE,
        message: "session has no upload id".into(),
        hint: Some("run `prospetti extract <file>` first".into()),
    })
}
