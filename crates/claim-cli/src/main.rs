//! Claim CLI - run the waitlist claim workflow.
//!
//! Each cycle creates a throwaway wallet, proves control of it by signing
//! the service's challenge, and submits the configured access code. Every
//! outcome is appended to a JSON history file.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use claim_audit::AuditLog;
use claim_config::env::collect_env_vars;
use claim_config::loader::load_unvalidated;

mod commands;
mod logging;
mod observer;
mod theme;

use commands::run::RunOverrides;
use commands::{config, history, run};

/// Claim - waitlist access-code claim runner
#[derive(Parser)]
#[command(name = "claim")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (default: ./claim.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default, Clone)]
struct RunArgs {
    /// Number of cycles to run
    #[arg(short = 'n', long)]
    cycles: Option<u32>,

    /// Access code to claim
    #[arg(short, long)]
    access_code: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the claim workflow (default)
    Run(RunArgs),

    /// Show recorded claims
    History {
        /// History file (default: audit.path from configuration)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// View and validate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Validate the resolved configuration
    Validate,
}

impl From<RunArgs> for RunOverrides {
    fn from(args: RunArgs) -> Self {
        Self {
            cycles: args.cycles,
            access_code: args.access_code,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration once; validation happens per command.
    let cwd = std::env::current_dir().ok();
    let resolved = load_unvalidated(cli.config.as_deref(), cwd.as_deref(), &collect_env_vars());

    let log_config = match &resolved {
        Ok(r) => logging::to_log_config(&r.config, cli.verbose),
        Err(_) => logging::fallback_log_config(cli.verbose),
    };
    if let Err(e) = claim_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let resolved = resolved.context("failed to load configuration")?;

    match cli.command {
        Some(Commands::Run(args)) => {
            run::run_claims(resolved.config, &args.into()).await?;
        },
        Some(Commands::History { path }) => {
            let path = path.unwrap_or_else(|| PathBuf::from(&resolved.config.audit.path));
            history::show_history(&AuditLog::new(path))?;
        },
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => config::show_config(&resolved)?,
            ConfigCommands::Validate => config::validate_config(&resolved)?,
        },
        None => {
            run::run_claims(resolved.config, &cli.run.into()).await?;
        },
    }

    Ok(())
}
