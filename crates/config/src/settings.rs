//! Generator settings
//!
//! TOML-based settings for the generator itself. Every section is optional;
//! an empty file targets development with info-level logging.
//!
//! ```toml
//! [generator]
//! environment = "prod"
//!
//! [log]
//! level = "debug"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::builder::CollectorConfigBuilder;
use crate::error::{ConfigError, Result};
use crate::logging::LogConfig;
use crate::telemetry::Environment;

/// Generator section
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Target environment (dev, staging, prod)
    /// Default: dev
    pub environment: Environment,
}

/// Top-level generator settings
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Generator settings
    pub generator: GeneratorSettings,

    /// Logging configuration
    pub log: LogConfig,
}

impl Settings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Start an empty builder for the configured environment
    pub fn builder(&self) -> CollectorConfigBuilder {
        CollectorConfigBuilder::new(self.generator.environment)
    }
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(ConfigError::ParseError)
    }
}
