//! `prospetti extract` — upload a source document and pull rows.

use std::path::PathBuf;

use clap::Args;

use crate::exit_codes::EXIT_ERROR;
use crate::session::{load_session, save_session};
use crate::{CliError, Ctx};

#[derive(Args)]
#[command(after_help = "\
Examples:
  prospetti extract buste_giugno.pdf
  prospetti extract buste_giugno.pdf --mode text --merge")]
pub struct ExtractArgs {
    /// Source document to upload
    pub file: PathBuf,

    /// OCR-mode identifier passed to the service
    #[arg(long, default_value = "ocr")]
    pub mode: String,

    /// Merge duplicate rows (same person) after extraction
    #[arg(long)]
    pub merge: bool,
}

pub fn cmd_extract(ctx: &Ctx, args: ExtractArgs) -> Result<(), CliError> {
    let mut state = load_session(&ctx.session_path)?;
    state.parsing.validate().map_err(|e| CliError {
        code: crate::exit_codes::EXIT_INVALID_CONFIG,
        message: e.to_string(),
        hint: None,
    })?;

    let bytes = std::fs::read(&args.file).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot read {}: {e}", args.file.display()),
        hint: None,
    })?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.bin".to_string());

    let client = ctx.client()?;
    let response = client.extract(&file_name, bytes, &args.mode, &state.parsing)?;

    for warning in &response.warnings {
        eprintln!("warning: {warning}");
    }

    state.extraction_mode = Some(args.mode);
    state.source_file = Some(file_name);
    state.upload_id = response.upload_id.clone();
    state.set_rows(response.rows);

    if args.merge {
        let report = state.merge_rows_in_place();
        for dropped in &report.dropped {
            eprintln!(
                "note: merge of '{}' kept {}={:?}, discarded {:?}",
                dropped.merge_key, dropped.field, dropped.kept, dropped.discarded
            );
        }
    }

    state.reclassify_all();
    save_session(&ctx.session_path, &state)?;

    println!(
        "extracted {} row(s){}",
        state.rows.len(),
        state
            .upload_id
            .as_deref()
            .map(|id| format!(" (upload {id})"))
            .unwrap_or_default()
    );
    Ok(())
}
