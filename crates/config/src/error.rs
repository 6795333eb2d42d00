//! Configuration error types
//!
//! Only construction-time failures live here. Policy and referential findings
//! are reported as [`Warning`](crate::Warning) values by `validate()` and never
//! surface as errors.

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when constructing components or emitting a document
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Telemetry kind string is not one of traces, metrics, logs
    #[error("unknown telemetry kind '{kind}', expected one of: traces, metrics, logs")]
    UnknownTelemetryKind {
        /// The rejected kind
        kind: String,
    },

    /// Environment string is not one of dev, staging, prod
    #[error("unknown environment '{environment}', expected one of: dev, staging, prod")]
    UnknownEnvironment {
        /// The rejected environment
        environment: String,
    },

    /// Failed to read a settings file
    #[error("failed to read settings file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML settings
    #[error("failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The YAML emitter rejected the assembled document
    #[error("failed to serialize collector config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create an UnknownTelemetryKind error
    #[inline]
    pub fn unknown_telemetry_kind(kind: impl Into<String>) -> Self {
        Self::UnknownTelemetryKind { kind: kind.into() }
    }

    /// Create an UnknownEnvironment error
    #[inline]
    pub fn unknown_environment(environment: impl Into<String>) -> Self {
        Self::UnknownEnvironment {
            environment: environment.into(),
        }
    }
}
