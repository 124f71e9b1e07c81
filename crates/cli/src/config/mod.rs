//! Command line configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use packwise::config::{CalculatorConfig, ConfigError};

use crate::commands::calculate::CalculateArgs;

pub(crate) mod observability;

pub(crate) use observability::{LogFormat, LoggingConfig};

/// Packwise command line interface
#[derive(Debug, Parser)]
#[command(name = "packwise", about = "Pack allocation calculator", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// YAML calculator configuration file
    #[arg(short, long, env = "PACKWISE_CONFIG", global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Calculate the packs to ship for one or more quantities
    Calculate(CalculateArgs),

    /// Print the configured default pack sizes
    Sizes,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    pub(crate) fn load() -> Self {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::parse()
    }

    /// Calculator configuration from `--config`, or the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub(crate) fn calculator_config(&self) -> Result<CalculatorConfig, ConfigError> {
        match &self.config {
            Some(path) => CalculatorConfig::from_path(path),
            None => Ok(CalculatorConfig::default()),
        }
    }
}
