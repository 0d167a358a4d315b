//! `prospetti rows` — inspect and edit the session's row set.

use clap::Subcommand;

use prospetti_core::fields::RowField;
use prospetti_core::model::RiskLabel;

use crate::exit_codes::EXIT_USAGE;
use crate::session::{load_session, save_session};
use crate::{CliError, Ctx};

#[derive(Subcommand)]
pub enum RowsCommands {
    /// List rows with their current risk labels
    List,

    /// Recompute risk labels for all rows
    Classify,

    /// Merge duplicate rows (same person), summing hour fields
    Merge,

    /// Edit one field of one row
    #[command(after_help = "\
Fields: name, role, ordinaryHours, overtimeHours, onCallHours, netPay,
        garnishment, hourlyCost

Examples:
  prospetti rows edit 3f2a ordinaryHours 160,5")]
    Edit {
        /// Row id (or unambiguous id prefix)
        id: String,
        /// Field name (camelCase, as listed above)
        field: String,
        /// New value; empty clears optional fields
        value: String,
    },

    /// Replace local rows with the server's canonical set
    Pull,

    /// Persist local rows (risk labels included) to the server
    Push,
}

pub fn cmd_rows(ctx: &Ctx, cmd: RowsCommands) -> Result<(), CliError> {
    match cmd {
        RowsCommands::List => cmd_list(ctx),
        RowsCommands::Classify => cmd_classify(ctx),
        RowsCommands::Merge => cmd_merge(ctx),
        RowsCommands::Edit { id, field, value } => cmd_edit(ctx, &id, &field, &value),
        RowsCommands::Pull => cmd_pull(ctx),
        RowsCommands::Push => cmd_push(ctx),
    }
}

fn cmd_list(ctx: &Ctx) -> Result<(), CliError> {
    let state = load_session(&ctx.session_path)?;
    if state.rows.is_empty() {
        println!("no rows in session");
        return Ok(());
    }
    for row in &state.rows {
        let risk = state.row_risk(row);
        let marker = if risk == RiskLabel::None { " " } else { "!" };
        println!(
            "{marker} {:8}  {:<28} ord={:<8} str={:<6} rep={:<6} net={:<10} {}",
            short_id(&row.id),
            row.name,
            row.ordinary_hours,
            row.overtime_hours,
            row.on_call_hours,
            row.net_pay,
            risk
        );
    }
    Ok(())
}

fn cmd_classify(ctx: &Ctx) -> Result<(), CliError> {
    let mut state = load_session(&ctx.session_path)?;
    state.reclassify_all();
    let risky = state
        .rows
        .iter()
        .filter(|r| r.risk != Some(RiskLabel::None))
        .count();
    save_session(&ctx.session_path, &state)?;
    println!("{} row(s) classified, {risky} with risks", state.rows.len());
    Ok(())
}

fn cmd_merge(ctx: &Ctx) -> Result<(), CliError> {
    let mut state = load_session(&ctx.session_path)?;
    let before = state.rows.len();
    let report = state.merge_rows_in_place();
    for dropped in &report.dropped {
        eprintln!(
            "note: merge of '{}' kept {}={:?}, discarded {:?}",
            dropped.merge_key, dropped.field, dropped.kept, dropped.discarded
        );
    }
    state.reclassify_all();
    save_session(&ctx.session_path, &state)?;
    println!("merged {before} row(s) into {}", state.rows.len());
    Ok(())
}

fn cmd_edit(ctx: &Ctx, id: &str, field: &str, value: &str) -> Result<(), CliError> {
    let mut state = load_session(&ctx.session_path)?;

    let field: RowField = field.parse().map_err(|e: prospetti_core::CoreError| CliError {
        code: EXIT_USAGE,
        message: e.to_string(),
        hint: Some(format!(
            "valid fields: {}",
            RowField::ALL.map(|f| f.wire_name()).join(", ")
        )),
    })?;

    let matches: Vec<String> = state
        .rows
        .iter()
        .filter(|r| r.id.starts_with(id))
        .map(|r| r.id.clone())
        .collect();
    let full_id = match matches.as_slice() {
        [one] => one.clone(),
        [] => {
            return Err(CliError {
                code: EXIT_USAGE,
                message: format!("no row with id '{id}'"),
                hint: Some("run `prospetti rows list` to see ids".into()),
            })
        }
        _ => {
            return Err(CliError {
                code: EXIT_USAGE,
                message: format!("id prefix '{id}' is ambiguous ({} matches)", matches.len()),
                hint: None,
            })
        }
    };

    state
        .set_row_field(&full_id, field, value)
        .map_err(|e| CliError {
            code: EXIT_USAGE,
            message: e.to_string(),
            hint: None,
        })?;
    state.reclassify_all();

    if let Some(row) = state.rows.iter().find(|r| r.id == full_id) {
        println!("{} {} = {:?} ({})", short_id(&row.id), field, field.get(row), state.row_risk(row));
    }
    save_session(&ctx.session_path, &state)
}

fn cmd_pull(ctx: &Ctx) -> Result<(), CliError> {
    let mut state = load_session(&ctx.session_path)?;
    let upload_id = require_upload(&state)?;
    let rows = ctx.client()?.fetch_rows(&upload_id)?;
    state.set_rows(rows);
    state.reclassify_all();
    save_session(&ctx.session_path, &state)?;
    println!("pulled {} row(s)", state.rows.len());
    Ok(())
}

fn cmd_push(ctx: &Ctx) -> Result<(), CliError> {
    let mut state = load_session(&ctx.session_path)?;
    let upload_id = require_upload(&state)?;
    state.reclassify_all();
    ctx.client()?.save_rows(&upload_id, &state.rows)?;
    save_session(&ctx.session_path, &state)?;
    println!("pushed {} row(s)", state.rows.len());
    Ok(())
}

fn require_upload(state: &prospetti_core::SessionState) -> Result<String, CliError> {
    state.upload_id.clone().ok_or_else(|| CliError {
        code: EXIT_USAGE,
        message: "session has no upload id".into(),
        hint: Some("run `prospetti extract <file>` first".into()),
    })
}

// Ids are uuids in practice, but server-supplied or hand-edited sessions
// can hold arbitrary strings; truncate on char boundaries.
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
