//! jwt-lens: an offline CLI for inspecting, verifying and minting JWTs.
//!
//! Entry point for the application. Parses CLI arguments and delegates
//! to the appropriate command handler.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod core;
mod display;
mod error;
mod logging;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use logging::Logging;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parse CLI arguments and dispatch to the appropriate command handler.
///
/// Returns `ExitCode` so the caller can exit without `process::exit`,
/// allowing all destructors (including `Zeroizing`) to run.
fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = Logging::try_init(cli.verbose) {
        eprintln!("Warning: {e}");
    }
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    tracing::debug!(command = cli.command.name(), "dispatching");

    match &cli.command {
        Commands::Decode(args) => commands::decode::execute(args)?,
        Commands::Verify(args) => {
            let signature_valid = commands::verify::execute(args)?;
            if !signature_valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Encode(args) => commands::encode::execute(args)?,
        Commands::Keygen(args) => commands::keygen::execute(args)?,
        Commands::Secret(args) => commands::secret::execute(args)?,
        Commands::Lifetime(args) => commands::lifetime::execute(args)?,
    }
    Ok(ExitCode::SUCCESS)
}
