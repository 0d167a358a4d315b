// prospetti CLI - payroll-hours session flow against the external
// extraction/compute/export service.

mod check;
mod compute;
mod config;
mod exit_codes;
mod extract;
mod rows;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_NETWORK, EXIT_SERVER, EXIT_SUCCESS};
use prospetti_client::ApiError;

/// Error carried to the top of the CLI: message, exit code, optional hint.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        let code = match err {
            ApiError::Network(_) => EXIT_NETWORK,
            ApiError::Http(_, _) => EXIT_SERVER,
            ApiError::Parse(_) | ApiError::Io(_) => EXIT_ERROR,
        };
        CliError {
            code,
            message: err.to_string(),
            hint: None,
        }
    }
}

#[derive(Parser)]
#[command(name = "prospetti")]
#[command(about = "Validate payroll-hours rows and assemble the export configuration")]
#[command(version)]
struct Cli {
    /// Base URL of the extraction/compute/export service
    #[arg(long, env = "PROSPETTI_API_BASE", global = true)]
    api_base: Option<String>,

    /// Directory holding the session file (defaults to the working directory)
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a source document, pull extracted rows into the session
    Extract(extract::ExtractArgs),

    /// Inspect and edit the session's row set
    #[command(subcommand)]
    Rows(rows::RowsCommands),

    /// Manage the configuration (presets, document assembly, persistence)
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Report export readiness (exit 10 when blocked)
    Check {
        /// Output JSON instead of a human summary
        #[arg(long)]
        json: bool,
    },

    /// Run the allocation computation server-side
    Compute {
        /// Output raw response JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the exported spreadsheet
    Export {
        /// Output file (defaults to prospetti_<year>_<month>.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show or reset the session file
    #[command(subcommand)]
    Session(SessionCommands),

    /// Show or change the stored service endpoint
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Print the session as JSON
    Show,
    /// Start over with an empty session
    Reset,
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the effective API base and where it comes from
    Show,
    /// Persist the API base to the settings file
    SetApiBase { url: String },
}

/// Shared command context: resolved endpoint + session file location.
pub struct Ctx {
    pub api_base: String,
    pub session_path: PathBuf,
}

impl Ctx {
    fn from_cli(cli: &Cli) -> Self {
        let api_base = cli
            .api_base
            .clone()
            .unwrap_or_else(|| prospetti_client::load_settings().api_base);
        Self {
            api_base,
            session_path: session::session_path(cli.session_dir.as_deref()),
        }
    }

    pub fn client(&self) -> Result<prospetti_client::ApiClient, CliError> {
        Ok(prospetti_client::ApiClient::new(self.api_base.clone())?)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let ctx = Ctx::from_cli(&cli);

    let result = match cli.command {
        Commands::Extract(args) => extract::cmd_extract(&ctx, args),
        Commands::Rows(cmd) => rows::cmd_rows(&ctx, cmd),
        Commands::Config(cmd) => config::cmd_config(&ctx, cmd),
        Commands::Check { json } => check::cmd_check(&ctx, json),
        Commands::Compute { json } => compute::cmd_compute(&ctx, json),
        Commands::Export { output } => compute::cmd_export(&ctx, output),
        Commands::Session(cmd) => cmd_session(&ctx, cmd),
        Commands::Settings(cmd) => cmd_settings(&ctx, cmd),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn cmd_session(ctx: &Ctx, cmd: SessionCommands) -> Result<(), CliError> {
    match cmd {
        SessionCommands::Show => {
            let state = session::load_session(&ctx.session_path)?;
            let json = serde_json::to_string_pretty(&state).map_err(|e| CliError {
                code: EXIT_ERROR,
                message: e.to_string(),
                hint: None,
            })?;
            println!("{json}");
            Ok(())
        }
        SessionCommands::Reset => {
            session::save_session(&ctx.session_path, &prospetti_core::SessionState::default())?;
            println!("session reset: {}", ctx.session_path.display());
            Ok(())
        }
    }
}

fn cmd_settings(ctx: &Ctx, cmd: SettingsCommands) -> Result<(), CliError> {
    match cmd {
        SettingsCommands::Show => {
            println!("api base: {}", ctx.api_base);
            if let Some(path) = prospetti_client::settings_file_path() {
                println!("settings file: {}", path.display());
            }
            Ok(())
        }
        SettingsCommands::SetApiBase { url } => {
            let settings = prospetti_client::Settings { api_base: url };
            prospetti_client::save_settings(&settings).map_err(|message| CliError {
                code: EXIT_ERROR,
                message,
                hint: None,
            })?;
            println!("api base saved: {}", settings.api_base);
            Ok(())
        }
    }
}
