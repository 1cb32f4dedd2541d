//! `ectoken` command-line entry point.
//!
//! Startup sequence:
//! 1. Parse command-line arguments.
//! 2. Load and validate [`Config`] from environment variables.
//! 3. Initialise structured logging to stderr.
//! 4. Run the requested subcommand, printing its result to stdout.

mod cli;
mod config;
mod telemetry;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use cli::{Cli, Command};
use config::Config;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::load(cli.secret.clone()).map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level, cfg.log_format)?;
    debug!(version = env!("CARGO_PKG_VERSION"), "ectoken starting");

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    let output = run(&cli.command, &cfg)?;
    writeln!(io::stdout(), "{output}").context("failed to write to stdout")?;
    Ok(())
}

fn run(command: &Command, cfg: &Config) -> Result<String> {
    match command {
        Command::Encrypt(args) => {
            let plaintext = cli::resolve_input(&args.plaintext)?;
            let token = ectoken::encrypt(cfg.secret(), &plaintext).map_err(|e| {
                warn!(error = %e, retryable = e.is_retryable(), "token not issued");
                e
            })?;
            info!(
                plaintext_len = plaintext.len(),
                token_len = token.len(),
                "token issued"
            );
            Ok(token)
        }
        Command::Decrypt(args) => {
            let token = cli::resolve_input(&args.token)?;
            let plaintext = ectoken::decrypt(cfg.secret(), token.trim())
                .map_err(|e| {
                    warn!(error = %e, token_len = token.len(), "token rejected");
                    e
                })
                .context("failed to decrypt token")?;
            info!(plaintext_len = plaintext.len(), "token verified");
            Ok(plaintext)
        }
    }
}
