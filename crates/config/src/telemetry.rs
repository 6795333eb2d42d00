//! Telemetry kinds and deployment environments
//!
//! Both are closed enumerations. String forms match the collector's pipeline
//! key prefixes (`traces`, `metrics`, `logs`) and the environment tags used
//! by deployment tooling (`dev`, `staging`, `prod`).

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Signal type carried by a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryKind {
    /// Distributed traces
    Traces,
    /// Metrics
    Metrics,
    /// Logs
    Logs,
}

impl TelemetryKind {
    /// All kinds, in canonical order
    pub const ALL: [TelemetryKind; 3] = [Self::Traces, Self::Metrics, Self::Logs];

    /// String form used in pipeline keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traces => "traces",
            Self::Metrics => "metrics",
            Self::Logs => "logs",
        }
    }
}

impl fmt::Display for TelemetryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TelemetryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "traces" => Ok(Self::Traces),
            "metrics" => Ok(Self::Metrics),
            "logs" => Ok(Self::Logs),
            other => Err(ConfigError::unknown_telemetry_kind(other)),
        }
    }
}

/// Deployment environment the document targets
///
/// Security checks only fire for [`Environment::Production`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Environment {
    /// Local development (default)
    #[default]
    #[serde(rename = "dev")]
    Development,
    /// Pre-production
    #[serde(rename = "staging")]
    Staging,
    /// Production
    #[serde(rename = "prod")]
    Production,
}

impl Environment {
    /// Short tag (`dev`, `staging`, `prod`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Staging => "staging",
            Self::Production => "prod",
        }
    }

    /// Check whether production-only policy applies
    #[inline]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "prod" => Ok(Self::Production),
            other => Err(ConfigError::unknown_environment(other)),
        }
    }
}
