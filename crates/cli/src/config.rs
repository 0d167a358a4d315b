//! `prospetti config` — presets, document assembly, persistence.

use std::path::PathBuf;

use clap::Subcommand;

use prospetti_core::model::{ParsingConfig, Role};
use prospetti_core::state::RoleDraft;
use prospetti_core::{assemble, Preset};

use crate::exit_codes::{EXIT_ERROR, EXIT_INVALID_CONFIG};
use crate::session::{load_session, save_session};
use crate::{CliError, Ctx};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Seed the session's roles/networks/CIGs from a preset
    Init {
        /// Builtin preset name (currently only "cas")
        #[arg(long, default_value = "cas", conflicts_with = "from_toml")]
        preset: String,

        /// Load the preset from a TOML file instead
        #[arg(long, value_name = "FILE")]
        from_toml: Option<PathBuf>,
    },

    /// Assemble the configuration document and print (or write) it
    Build {
        /// Write the JSON document to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Assemble the document and save it to the service
    Push,

    /// Load a named document from the service into the session
    Pull {
        /// Configuration name on the server
        name: String,
    },
}

pub fn cmd_config(ctx: &Ctx, cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Init { preset, from_toml } => cmd_init(ctx, &preset, from_toml),
        ConfigCommands::Build { output } => cmd_build(ctx, output),
        ConfigCommands::Push => cmd_push(ctx),
        ConfigCommands::Pull { name } => cmd_pull(ctx, &name),
    }
}

fn cmd_init(ctx: &Ctx, preset_name: &str, from_toml: Option<PathBuf>) -> Result<(), CliError> {
    let preset = match from_toml {
        Some(path) => {
            let contents = std::fs::read_to_string(&path).map_err(|e| CliError {
                code: EXIT_ERROR,
                message: format!("cannot read {}: {e}", path.display()),
                hint: None,
            })?;
            Preset::from_toml(&contents).map_err(|e| CliError {
                code: EXIT_INVALID_CONFIG,
                message: format!("{}: {e}", path.display()),
                hint: None,
            })?
        }
        None => {
            if preset_name != "cas" {
                return Err(CliError {
                    code: EXIT_INVALID_CONFIG,
                    message: format!("unknown builtin preset '{preset_name}'"),
                    hint: Some("builtin presets: cas (or use --from-toml <file>)".into()),
                });
            }
            Preset::builtin()
        }
    };

    let mut state = load_session(&ctx.session_path)?;
    state.apply_preset(&preset);
    save_session(&ctx.session_path, &state)?;
    println!(
        "applied preset '{}': {} role(s), {} network(s), {} CIG group(s)",
        preset.name,
        preset.roles.len(),
        preset.networks.len(),
        preset.cigs.len()
    );
    Ok(())
}

fn cmd_build(ctx: &Ctx, output: Option<PathBuf>) -> Result<(), CliError> {
    let state = load_session(&ctx.session_path)?;
    let document = assemble(&state);
    let json = serde_json::to_string_pretty(&document).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: e.to_string(),
        hint: None,
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, json).map_err(|e| CliError {
                code: EXIT_ERROR,
                message: format!("cannot write {}: {e}", path.display()),
                hint: None,
            })?;
            println!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_push(ctx: &Ctx) -> Result<(), CliError> {
    let state = load_session(&ctx.session_path)?;
    let document = assemble(&state);
    ctx.client()?.save_config(&document)?;
    println!("saved configuration '{}'", document.name);
    Ok(())
}

fn cmd_pull(ctx: &Ctx, name: &str) -> Result<(), CliError> {
    let document = ctx.client()?.fetch_config(name)?;
    let mut state = load_session(&ctx.session_path)?;

    state.config_name = document.name;
    state.period = document.period;
    state.parsing = ParsingConfig {
        patterns: document.locale.patterns,
        decimal_separator: document.locale.decimal_separator,
        thousands_separator: document.locale.thousands_separator,
    };
    state.roles = document.roles.into_iter().map(draft_from_role).collect();
    state.networks = document.networks;
    state.cigs = document.cigs;
    state.consume_all_hours = document.consume_all_hours;

    save_session(&ctx.session_path, &state)?;
    println!(
        "loaded configuration '{}' ({} role(s), {} network(s))",
        state.config_name,
        state.roles.len(),
        state.networks.len()
    );
    Ok(())
}

// Documents carry coerced values; rehydrate them as drafts so later edits
// behave the same as hand-entered ones.
fn draft_from_role(role: Role) -> RoleDraft {
    RoleDraft {
        name: role.name,
        demand_kind: role.demand_kind,
        demand_value: Some(role.demand_value),
        rounding_step: Some(role.rounding_step),
        rounding: role.rounding,
        chunk_hours: Some(role.chunk_hours),
        allow_last_fragment: role.allow_last_fragment,
        last_fragment_step: Some(role.last_fragment_step),
        cost_mode: role.cost_mode,
        cost_value: Some(role.cost_value),
    }
}
