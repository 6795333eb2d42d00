//! Pipeline wiring
//!
//! A pipeline connects named receivers, processors and exporters for one
//! telemetry kind. Names are resolved against the builder's registries only
//! during validation; a pipeline on its own knows nothing about them.

use serde_yaml::{Mapping, Value};

use crate::telemetry::TelemetryKind;
use crate::warning::Warning;

/// Processor that must come first when present
const MEMORY_LIMITER: &str = "memory_limiter";

/// Substring that identifies a batching processor
const BATCH_MARKER: &str = "batch";

/// Ordered receiver → processor → exporter wiring for one telemetry kind
///
/// # Example
///
/// ```
/// use otelgen_config::{Pipeline, TelemetryKind};
///
/// let pipeline = Pipeline::new("default", TelemetryKind::Metrics)
///     .receiver("otlp")
///     .processor("memory_limiter")
///     .processor("batch")
///     .exporter("prometheusremotewrite");
///
/// assert_eq!(pipeline.key(), "metrics/default");
/// assert!(pipeline.validate().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// Pipeline name
    pub name: String,
    /// Signal carried by this pipeline
    pub telemetry_kind: TelemetryKind,
    /// Receiver names, in order
    pub receivers: Vec<String>,
    /// Processor names, in execution order
    pub processors: Vec<String>,
    /// Exporter names, in order
    pub exporters: Vec<String>,
    /// Whether the pipeline is emitted
    /// Default: true
    pub enabled: bool,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new(name: impl Into<String>, telemetry_kind: TelemetryKind) -> Self {
        Self {
            name: name.into(),
            telemetry_kind,
            receivers: Vec::new(),
            processors: Vec::new(),
            exporters: Vec::new(),
            enabled: true,
        }
    }

    /// Storage key in `service.pipelines` (`<kind>/<name>`)
    pub fn key(&self) -> String {
        format!("{}/{}", self.telemetry_kind, self.name)
    }

    /// Append a receiver
    #[must_use]
    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.receivers.push(name.into());
        self
    }

    /// Append a processor
    #[must_use]
    pub fn processor(mut self, name: impl Into<String>) -> Self {
        self.processors.push(name.into());
        self
    }

    /// Append an exporter
    #[must_use]
    pub fn exporter(mut self, name: impl Into<String>) -> Self {
        self.exporters.push(name.into());
        self
    }

    /// Replace the receiver list
    #[must_use]
    pub fn with_receivers(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.receivers = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the processor list
    #[must_use]
    pub fn with_processors(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.processors = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exporter list
    #[must_use]
    pub fn with_exporters(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exporters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Keep the pipeline registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check whether any processor name contains `batch`
    pub fn has_batch_processor(&self) -> bool {
        self.processors.iter().any(|p| p.contains(BATCH_MARKER))
    }

    /// Project into the collector's pipeline mapping
    ///
    /// `receivers` is always present; `processors` and `exporters` only when
    /// non-empty.
    pub fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert("receivers".into(), names(&self.receivers));
        if !self.processors.is_empty() {
            config.insert("processors".into(), names(&self.processors));
        }
        if !self.exporters.is_empty() {
            config.insert("exporters".into(), names(&self.exporters));
        }
        config
    }

    /// Check wiring rules that don't need the builder's registries
    ///
    /// Checks run in a fixed order: receivers present, exporters present,
    /// memory limiter first, batch processor present.
    pub fn validate(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();

        if self.receivers.is_empty() {
            warnings.push(Warning::advisory(format!(
                "pipeline {}: no receivers",
                self.name
            )));
        }

        if self.exporters.is_empty() {
            warnings.push(Warning::advisory(format!(
                "pipeline {}: no exporters",
                self.name
            )));
        }

        if self.processors.iter().any(|p| p == MEMORY_LIMITER)
            && self.processors.first().map(String::as_str) != Some(MEMORY_LIMITER)
        {
            warnings.push(Warning::advisory(format!(
                "pipeline {}: memory_limiter must be the first processor",
                self.name
            )));
        }

        if !self.has_batch_processor() {
            warnings.push(Warning::advisory(format!(
                "pipeline {}: no batch processor, throughput will suffer",
                self.name
            )));
        }

        warnings
    }
}

fn names(list: &[String]) -> Value {
    Value::Sequence(list.iter().map(|n| Value::from(n.as_str())).collect())
}
