//! Processor components
//!
//! Processors are the in-pipeline stages: memory limiting, batching and
//! attribute mutation. Batch defaults are tuned per telemetry kind.

use serde_yaml::{Mapping, Value};

use crate::component::Component;
use crate::error::Result;
use crate::telemetry::{Environment, TelemetryKind};
use crate::warning::Warning;

/// Action verbs accepted by the attributes processor
pub const KNOWN_ATTRIBUTE_ACTIONS: &[&str] =
    &["insert", "update", "upsert", "delete", "hash", "extract"];

/// A processor instance
#[derive(Debug, Clone)]
pub enum Processor {
    /// Memory limiter
    MemoryLimiter(MemoryLimiterProcessor),
    /// Batching
    Batch(BatchProcessor),
    /// Attribute mutation
    Attributes(AttributesProcessor),
}

impl Component for Processor {
    fn name(&self) -> &str {
        match self {
            Self::MemoryLimiter(c) => c.name(),
            Self::Batch(c) => c.name(),
            Self::Attributes(c) => c.name(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::MemoryLimiter(c) => c.type_name(),
            Self::Batch(c) => c.type_name(),
            Self::Attributes(c) => c.type_name(),
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            Self::MemoryLimiter(c) => c.enabled,
            Self::Batch(c) => c.enabled,
            Self::Attributes(c) => c.enabled,
        }
    }

    fn to_config(&self) -> Mapping {
        match self {
            Self::MemoryLimiter(c) => c.to_config(),
            Self::Batch(c) => c.to_config(),
            Self::Attributes(c) => c.to_config(),
        }
    }

    fn validate(&self, environment: Environment) -> Vec<Warning> {
        match self {
            Self::MemoryLimiter(c) => c.validate(environment),
            Self::Batch(c) => c.validate(environment),
            Self::Attributes(c) => c.validate(environment),
        }
    }
}

impl From<MemoryLimiterProcessor> for Processor {
    fn from(processor: MemoryLimiterProcessor) -> Self {
        Self::MemoryLimiter(processor)
    }
}

impl From<BatchProcessor> for Processor {
    fn from(processor: BatchProcessor) -> Self {
        Self::Batch(processor)
    }
}

impl From<AttributesProcessor> for Processor {
    fn from(processor: AttributesProcessor) -> Self {
        Self::Attributes(processor)
    }
}

// =============================================================================
// Memory limiter
// =============================================================================

/// Memory limiter processor
///
/// Should be the first processor in every pipeline that uses it.
#[derive(Debug, Clone)]
pub struct MemoryLimiterProcessor {
    /// Instance name
    /// Default: memory_limiter
    pub name: String,

    /// Whether the processor is emitted
    /// Default: true
    pub enabled: bool,

    /// How often memory usage is checked
    /// Default: 1s
    pub check_interval: String,

    /// Hard limit in MiB
    /// Default: 512
    pub limit_mib: u32,

    /// Headroom for spikes in MiB
    /// Default: 128
    pub spike_limit_mib: u32,
}

impl Default for MemoryLimiterProcessor {
    fn default() -> Self {
        Self::new("memory_limiter")
    }
}

impl MemoryLimiterProcessor {
    /// Create a limiter with default limits
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            check_interval: "1s".to_string(),
            limit_mib: 512,
            spike_limit_mib: 128,
        }
    }

    /// Set the hard and spike limits
    #[must_use]
    pub fn with_limits(mut self, limit_mib: u32, spike_limit_mib: u32) -> Self {
        self.limit_mib = limit_mib;
        self.spike_limit_mib = spike_limit_mib;
        self
    }

    /// Set the check interval
    #[must_use]
    pub fn with_check_interval(mut self, interval: impl Into<String>) -> Self {
        self.check_interval = interval.into();
        self
    }

    /// Keep the processor registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Component for MemoryLimiterProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "memory_limiter"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert("check_interval".into(), self.check_interval.as_str().into());
        config.insert("limit_mib".into(), self.limit_mib.into());
        config.insert("spike_limit_mib".into(), self.spike_limit_mib.into());
        config
    }

    fn validate(&self, _environment: Environment) -> Vec<Warning> {
        // spike > limit / 2, compared without rounding
        if u64::from(self.spike_limit_mib) * 2 > u64::from(self.limit_mib) {
            return vec![Warning::advisory(format!(
                "{}: spike_limit_mib ({}) exceeds 50% of limit_mib ({})",
                self.name, self.spike_limit_mib, self.limit_mib
            ))];
        }
        Vec::new()
    }
}

// =============================================================================
// Batch
// =============================================================================

/// Batch sizing for one telemetry kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDefaults {
    /// Items per batch that trigger a send
    pub send_batch_size: u32,
    /// Upper bound for a single batch
    pub send_batch_max_size: u32,
    /// Flush timeout
    pub timeout: &'static str,
}

impl BatchDefaults {
    /// Default sizing for `kind`
    pub fn for_kind(kind: TelemetryKind) -> Self {
        let (send_batch_size, send_batch_max_size, timeout) = match kind {
            TelemetryKind::Traces => (256, 512, "1s"),
            TelemetryKind::Metrics => (1024, 2048, "5s"),
            TelemetryKind::Logs => (512, 1024, "1s"),
        };
        Self {
            send_batch_size,
            send_batch_max_size,
            timeout,
        }
    }
}

/// Batch processor tuned for a telemetry kind
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Instance name
    pub name: String,

    /// Whether the processor is emitted
    /// Default: true
    pub enabled: bool,

    /// Kind the defaults were chosen for
    pub telemetry_kind: TelemetryKind,

    /// Items per batch that trigger a send
    pub send_batch_size: u32,

    /// Upper bound for a single batch
    pub send_batch_max_size: u32,

    /// Flush timeout
    pub timeout: String,
}

impl BatchProcessor {
    /// Create a batch processor with the defaults for `kind`
    pub fn new(name: impl Into<String>, kind: TelemetryKind) -> Self {
        let defaults = BatchDefaults::for_kind(kind);
        Self {
            name: name.into(),
            enabled: true,
            telemetry_kind: kind,
            send_batch_size: defaults.send_batch_size,
            send_batch_max_size: defaults.send_batch_max_size,
            timeout: defaults.timeout.to_string(),
        }
    }

    /// Create a batch processor from a telemetry kind string
    ///
    /// # Errors
    ///
    /// Returns `UnknownTelemetryKind` if `kind` is not traces, metrics or logs.
    pub fn for_kind_name(name: impl Into<String>, kind: &str) -> Result<Self> {
        Ok(Self::new(name, kind.parse()?))
    }

    /// Override the batch sizes
    #[must_use]
    pub fn with_sizes(mut self, send_batch_size: u32, send_batch_max_size: u32) -> Self {
        self.send_batch_size = send_batch_size;
        self.send_batch_max_size = send_batch_max_size;
        self
    }

    /// Override the flush timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Keep the processor registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Component for BatchProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "batch"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert("send_batch_size".into(), self.send_batch_size.into());
        config.insert(
            "send_batch_max_size".into(),
            self.send_batch_max_size.into(),
        );
        config.insert("timeout".into(), self.timeout.as_str().into());
        config
    }

    fn validate(&self, _environment: Environment) -> Vec<Warning> {
        if self.send_batch_max_size < self.send_batch_size {
            return vec![Warning::advisory(format!(
                "{}: send_batch_max_size ({}) is smaller than send_batch_size ({})",
                self.name, self.send_batch_max_size, self.send_batch_size
            ))];
        }
        Vec::new()
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// A single attribute mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAction {
    /// Verb (insert, update, upsert, delete, hash, extract)
    pub action: String,
    /// Attribute key
    pub key: String,
    /// Value for insert/update/upsert
    pub value: Option<String>,
}

impl AttributeAction {
    /// Check whether the verb is one the collector understands
    #[inline]
    pub fn is_known(&self) -> bool {
        KNOWN_ATTRIBUTE_ACTIONS.contains(&self.action.as_str())
    }

    fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert("action".into(), self.action.as_str().into());
        config.insert("key".into(), self.key.as_str().into());
        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            config.insert("value".into(), value.into());
        }
        config
    }
}

/// Attributes processor applying an ordered list of actions
#[derive(Debug, Clone)]
pub struct AttributesProcessor {
    /// Instance name
    /// Default: attributes
    pub name: String,

    /// Whether the processor is emitted
    /// Default: true
    pub enabled: bool,

    /// Actions in application order
    pub actions: Vec<AttributeAction>,
}

impl Default for AttributesProcessor {
    fn default() -> Self {
        Self::new("attributes")
    }
}

impl AttributesProcessor {
    /// Create a processor with no actions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            actions: Vec::new(),
        }
    }

    /// Append an action
    ///
    /// The verb is not checked here; unknown verbs are reported by
    /// `validate`.
    #[must_use]
    pub fn add_action(
        mut self,
        action: impl Into<String>,
        key: impl Into<String>,
        value: Option<&str>,
    ) -> Self {
        self.actions.push(AttributeAction {
            action: action.into(),
            key: key.into(),
            value: value.map(str::to_string),
        });
        self
    }

    /// Keep the processor registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Component for AttributesProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "attributes"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn to_config(&self) -> Mapping {
        let actions = self
            .actions
            .iter()
            .map(|a| Value::Mapping(a.to_config()))
            .collect();

        let mut config = Mapping::new();
        config.insert("actions".into(), Value::Sequence(actions));
        config
    }

    fn validate(&self, _environment: Environment) -> Vec<Warning> {
        self.actions
            .iter()
            .filter(|a| !a.is_known())
            .map(|a| {
                Warning::advisory(format!(
                    "{}: unknown action '{}' for key '{}'",
                    self.name, a.action, a.key
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_defaults_table() {
        let expected = [
            (TelemetryKind::Traces, 256, 512, "1s"),
            (TelemetryKind::Metrics, 1024, 2048, "5s"),
            (TelemetryKind::Logs, 512, 1024, "1s"),
        ];
        for (kind, size, max, timeout) in expected {
            let batch = BatchProcessor::new("batch", kind);
            assert_eq!(batch.send_batch_size, size, "{kind}");
            assert_eq!(batch.send_batch_max_size, max, "{kind}");
            assert_eq!(batch.timeout, timeout, "{kind}");
        }
    }

    #[test]
    fn test_batch_for_kind_name() {
        let batch = BatchProcessor::for_kind_name("batch/logs", "logs").unwrap();
        assert_eq!(batch.telemetry_kind, TelemetryKind::Logs);
        assert_eq!(batch.send_batch_size, 512);
    }

    #[test]
    fn test_batch_unknown_kind_aborts_construction() {
        let err = BatchProcessor::for_kind_name("batch", "profiles").unwrap_err();
        assert!(err.to_string().contains("profiles"));
    }

    #[test]
    fn test_batch_projection() {
        let config = BatchProcessor::new("batch", TelemetryKind::Metrics).to_config();
        let keys: Vec<_> = config.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["send_batch_size", "send_batch_max_size", "timeout"]);
        assert_eq!(config.get("send_batch_size").and_then(Value::as_u64), Some(1024));
        assert_eq!(config.get("timeout").and_then(Value::as_str), Some("5s"));
    }

    #[test]
    fn test_batch_max_below_size_warns() {
        let batch = BatchProcessor::new("batch", TelemetryKind::Traces).with_sizes(512, 256);
        assert_eq!(batch.validate(Environment::Development).len(), 1);
        assert!(BatchProcessor::new("batch", TelemetryKind::Traces)
            .validate(Environment::Production)
            .is_empty());
    }

    #[test]
    fn test_memory_limiter_defaults() {
        let config = Value::Mapping(MemoryLimiterProcessor::default().to_config());
        assert_eq!(config["check_interval"].as_str(), Some("1s"));
        assert_eq!(config["limit_mib"].as_u64(), Some(512));
        assert_eq!(config["spike_limit_mib"].as_u64(), Some(128));
    }

    #[test]
    fn test_memory_limiter_spike_over_half_warns_once() {
        let limiter = MemoryLimiterProcessor::default().with_limits(512, 300);
        let warnings = limiter.validate(Environment::Development);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("spike_limit_mib"));
    }

    #[test]
    fn test_memory_limiter_spike_within_half_is_clean() {
        let limiter = MemoryLimiterProcessor::default().with_limits(512, 200);
        assert!(limiter.validate(Environment::Production).is_empty());

        // exactly half is allowed
        let limiter = MemoryLimiterProcessor::default().with_limits(512, 256);
        assert!(limiter.validate(Environment::Production).is_empty());
    }

    #[test]
    fn test_memory_limiter_odd_limit_compares_exactly() {
        // 257 / 2 = 128.5, so 129 exceeds half
        let limiter = MemoryLimiterProcessor::default().with_limits(257, 129);
        assert_eq!(limiter.validate(Environment::Development).len(), 1);
        let limiter = MemoryLimiterProcessor::default().with_limits(257, 128);
        assert!(limiter.validate(Environment::Development).is_empty());
    }

    #[test]
    fn test_attributes_projection() {
        let processor = AttributesProcessor::default()
            .add_action("insert", "env", Some("prod"))
            .add_action("delete", "password", None)
            .add_action("upsert", "team", Some(""));
        let config = Value::Mapping(processor.to_config());
        let actions = config["actions"].as_sequence().unwrap();

        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0]["action"].as_str(), Some("insert"));
        assert_eq!(actions[0]["value"].as_str(), Some("prod"));
        assert!(actions[1].get("value").is_none());
        assert!(actions[2].get("value").is_none());
    }

    #[test]
    fn test_attributes_unknown_actions_warn_individually() {
        let processor = AttributesProcessor::default()
            .add_action("insert", "env", Some("prod"))
            .add_action("rename", "a", None)
            .add_action("drop", "b", None);
        let warnings = processor.validate(Environment::Development);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("'rename'"));
        assert!(warnings[1].message.contains("'drop'"));
    }

    #[test]
    fn test_all_known_actions_accepted() {
        let processor = KNOWN_ATTRIBUTE_ACTIONS
            .iter()
            .fold(AttributesProcessor::default(), |p, action| {
                p.add_action(*action, "k", None)
            });
        assert!(processor.validate(Environment::Production).is_empty());
    }

    #[test]
    fn test_type_names() {
        let processors: [Processor; 3] = [
            MemoryLimiterProcessor::default().into(),
            BatchProcessor::new("batch", TelemetryKind::Logs).into(),
            AttributesProcessor::default().into(),
        ];
        let names: Vec<_> = processors.iter().map(Component::type_name).collect();
        assert_eq!(names, ["memory_limiter", "batch", "attributes"]);
    }
}
