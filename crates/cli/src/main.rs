//! Packwise command line interface

use std::{io, process::ExitCode};

use packwise::calculator::PackCalculator;
use tracing::{debug, error};

use crate::config::{Cli, Commands};

mod commands;
mod config;
mod observability;

fn main() -> ExitCode {
    let cli = Cli::load();

    if let Err(source) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {source}");
        }

        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(source) => {
            error!("{source:#}");

            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.calculator_config()?;

    debug!(
        sizes = %config.default_sizes,
        capacity = config.cache.max_capacity,
        ttl = ?config.cache.ttl,
        "loaded calculator configuration"
    );

    let calculator = PackCalculator::new(&config);
    let stdout = io::stdout();

    match &cli.command {
        Commands::Calculate(args) => commands::calculate::run(args, &calculator, stdout.lock()),
        Commands::Sizes => Ok(commands::sizes::run(&calculator, stdout.lock())?),
    }
}
