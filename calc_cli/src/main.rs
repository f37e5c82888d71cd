//! # Tally CLI
//!
//! Business math calculators from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Economic order quantity with the sampled cost curve
//! calc_cli eoq --demand 1000 --order-cost 50 --holding-cost 2 --chart
//!
//! # NPV and IRR of a five-year annuity
//! calc_cli npv --investment 1000000 --rate-percent 10 --cash-flow 300000,300000,300000,300000,300000
//!
//! # Regression from a CSV file, as JSON
//! calc_cli --json regression --csv sales.csv --predict 10
//!
//! # Graphical linear program
//! calc_cli lp --c1 3 --c2 5 --constraint 1,0,4 --constraint 0,2,12 --constraint 3,2,18
//!
//! # Write the formula reference sheet
//! calc_cli formulas --output EQUATIONS.md
//!
//! # Prompt-driven session
//! calc_cli interactive
//! ```
//!
//! Set `CALC_LOG` (e.g. `CALC_LOG=debug`) to see solver progress on stderr.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calc_core::{CalcError, ChartSettings};

mod cli;
mod commands;
mod csv_input;
mod interactive;
mod report;

use cli::{Cli, Commands};
use commands::Context;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<ChartSettings> {
    let Some(path) = path else {
        return Ok(ChartSettings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let settings = ChartSettings::from_json(&text)
        .with_context(|| format!("Invalid chart settings in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded chart settings");
    Ok(settings)
}

fn execute(cli: Cli) -> Result<()> {
    let ctx = Context {
        json: cli.json,
        settings: load_settings(cli.config.as_deref())?,
    };

    match cli.command {
        Commands::Eoq(args) => commands::eoq(args, &ctx),
        Commands::Bep(args) => commands::bep(args, &ctx),
        Commands::Npv(args) => commands::npv(args, &ctx),
        Commands::Regression(args) => commands::regression(args, &ctx),
        Commands::Lp(args) => commands::lp(args, &ctx),
        Commands::Run { file } => commands::run(&file, &ctx),
        Commands::Formulas { method, output } => {
            commands::formulas(method.map(Into::into), output.as_deref(), &ctx)
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut session = interactive::Session::new(stdin.lock(), io::stdout());
            session.run(&ctx)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = io::stderr().lock();
            let written = match err.downcast_ref::<CalcError>() {
                Some(calc_err) => report::error(&mut stderr, calc_err, json),
                None => writeln!(stderr, "Error: {:#}", err),
            };
            if written.is_err() {
                tracing::error!(%err, "Failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}
