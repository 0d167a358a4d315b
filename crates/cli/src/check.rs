//! `prospetti check` — export readiness report.

use prospetti_core::readiness;

use crate::exit_codes::EXIT_NOT_READY;
use crate::session::load_session;
use crate::{CliError, Ctx};

pub fn cmd_check(ctx: &Ctx, json: bool) -> Result<(), CliError> {
    let state = load_session(&ctx.session_path)?;
    let report = readiness(&state);
    let days = state.period.days_in_month();
    let weeks = state.period.weeks_in_month();

    if json {
        let value = serde_json::json!({
            "ready": !report.has_blocking_issues,
            "period": {
                "year": state.period.year,
                "month": state.period.month,
                "days": days,
                "weeks": weeks,
            },
            "missing": report.missing_items,
            "warnings": report.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&value).map_err(|e| CliError {
            code: crate::exit_codes::EXIT_ERROR,
            message: e.to_string(),
            hint: None,
        })?);
    } else {
        println!(
            "period {}-{:02}: {days} day(s), {weeks:.1} week(s)",
            state.period.year, state.period.month
        );
        for warning in &report.warnings {
            eprintln!("warning: {warning}");
        }
        if report.has_blocking_issues {
            println!("not ready for export:");
            for item in &report.missing_items {
                println!("  - {item}");
            }
        } else {
            println!("ready for export");
        }
    }

    if report.has_blocking_issues {
        return Err(CliError {
            code: EXIT_NOT_READY,
            message: format!("{} blocking issue(s)", report.missing_items.len()),
            hint: None,
        });
    }
    Ok(())
}
