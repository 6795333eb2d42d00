//! Exporter retry policy

use serde_yaml::Mapping;

/// `retry_on_failure` block for exporters
///
/// Intervals are kept as collector duration strings (`"5s"`, `"300s"`) and
/// emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Whether failed exports are retried
    /// Default: true
    pub enabled: bool,

    /// Delay before the first retry
    /// Default: 5s
    pub initial_interval: String,

    /// Upper bound for the backoff delay
    /// Default: 30s
    pub max_interval: String,

    /// Give up after this much time
    /// Default: 300s
    pub max_elapsed_time: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_interval: "5s".to_string(),
            max_interval: "30s".to_string(),
            max_elapsed_time: "300s".to_string(),
        }
    }
}

impl RetryConfig {
    /// Retries turned off
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Project into the collector's `retry_on_failure` mapping
    pub fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert("enabled".into(), self.enabled.into());
        config.insert(
            "initial_interval".into(),
            self.initial_interval.as_str().into(),
        );
        config.insert("max_interval".into(), self.max_interval.as_str().into());
        config.insert(
            "max_elapsed_time".into(),
            self.max_elapsed_time.as_str().into(),
        );
        config
    }
}
