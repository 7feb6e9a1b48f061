//! # fx CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fx_cli::contexts::{run_contexts, ContextsArgs};
use fx_cli::evaluate::{run_evaluate, EvaluateArgs};
use fx_cli::identify::{run_identify, IdentifyArgs};

/// Factory-X connector trust core CLI
///
/// Identifies counterparties from their claims, evaluates credential
/// constraints, and lists the protocol contexts this connector registers.
#[derive(Parser, Debug)]
#[command(name = "fx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the counterparty identifier from a claims file.
    Identify(IdentifyArgs),

    /// Evaluate a credential constraint against a claims file.
    Evaluate(EvaluateArgs),

    /// List the registered protocol contexts.
    Contexts(ContextsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!("fx CLI starting");

    let result = match cli.command {
        Commands::Identify(args) => run_identify(&args),
        Commands::Evaluate(args) => run_evaluate(&args),
        Commands::Contexts(args) => run_contexts(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
