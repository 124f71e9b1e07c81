//! Calculator configuration

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cache::CacheConfig, packs::PackSizes, solvers::dp::SolverLimits};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Settings for a [`PackCalculator`](crate::calculator::PackCalculator).
///
/// Every field has a default, so an empty document is a valid configuration:
///
/// ```yaml
/// default_sizes: [250, 500, 1000, 2000, 5000]
/// cache:
///   max_capacity: 10000
///   ttl_seconds: 300
/// limits:
///   max_ceiling: 10000000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Pack sizes used when a request does not bring its own.
    pub default_sizes: PackSizes,

    /// Result cache settings.
    pub cache: CacheConfig,

    /// Solver resource bounds.
    pub limits: SolverLimits,
}

impl CalculatorConfig {
    /// Parse a configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is malformed or holds an
    /// invalid pack size set.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}
