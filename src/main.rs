//! Binary entry point for hedgedoc-history.
//!
//! This binary provides the CLI interface for building the history reference.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use secrecy::SecretString;
use std::path::PathBuf;
use std::process::ExitCode;

use commands::MarkdownArgs;
use hedgedoc_history::hedgedoc::get_config;
use hedgedoc_history::observability::{self, LogLevel, LoggingConfig};
use hedgedoc_history::services::ReferenceService;
use hedgedoc_history::{AppConfig, HedgedocCli, NoteService, Result};

/// Environment variable naming the configuration file.
const ENV_CONFIG_PATH: &str = "HD_HISTORY_CONFIG";

/// Organize your HedgeDoc note history into a tagged markdown reference.
#[derive(Parser)]
#[command(name = "hedgedoc-history")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level used when --debug is set.
    #[arg(long, global = true, value_enum, ignore_case = true, default_value_t)]
    log_level: LogLevel,

    /// Enable logging.
    #[arg(long, global = true)]
    debug: bool,

    /// HedgeDoc login email.
    #[arg(short, long, global = true, env = "HD_USER")]
    username: Option<String>,

    /// HedgeDoc password.
    #[arg(short, long, global = true, env = "HD_PASS", hide_env_values = true)]
    password: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List the note history.
    History {
        /// Only list pinned notes.
        #[arg(long)]
        only_pinned: bool,
    },

    /// Print the flattened tag taxonomy.
    Structure {
        /// Taxonomy file (default: hd.structure.yaml).
        #[arg(short, long)]
        structure: Option<PathBuf>,
    },

    /// Generate the reference markdown.
    Md(MarkdownArgs),

    /// Generate the reference markdown and upload it.
    UploadReference {
        #[command(flatten)]
        markdown: MarkdownArgs,

        /// Id of the reference note to replace.
        #[arg(long)]
        reference_id: Option<String>,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(Some(&config.logging), cli.log_level, cli.debug);
    if let Err(e) = observability::init(logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &AppConfig) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        commands::cmd_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let service = connect(config, cli.username.as_deref(), cli.password)?;

    match cli.command {
        Commands::History { only_pinned } => commands::cmd_history(&service, only_pinned),
        Commands::Structure { structure } => {
            let path = structure.unwrap_or_else(|| config.structure_path.clone());
            commands::cmd_structure(&path)
        },
        Commands::Md(args) => commands::cmd_md(&service, config, &args).map(|_| ()),
        Commands::UploadReference {
            markdown,
            reference_id,
        } => commands::cmd_upload_reference(&service, config, &markdown, reference_id),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Logs in when credentials are given and reads the server profile.
fn connect(
    config: &AppConfig,
    username: Option<&str>,
    password: Option<String>,
) -> Result<ReferenceService<HedgedocCli>> {
    let notes = HedgedocCli::new(&config.program, config.command_timeout);
    match (username, password) {
        (Some(username), Some(password)) => {
            notes.login(username, &SecretString::from(password))?;
        },
        _ => tracing::debug!("No credentials given, reusing existing session"),
    }

    let server = get_config(&notes)?;
    tracing::debug!(server = %server.server, user = %server.user, "Loaded server config");
    Ok(ReferenceService::new(notes, server))
}

/// Loads configuration.
fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return AppConfig::load_from_file(config_path).map(AppConfig::with_env_overrides);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
        if !config_path.trim().is_empty() {
            return AppConfig::load_from_file(std::path::Path::new(&config_path))
                .map(AppConfig::with_env_overrides);
        }
    }

    // Otherwise, load from default location
    Ok(AppConfig::load_default().with_env_overrides())
}
