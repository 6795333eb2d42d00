//! Collector configuration builder
//!
//! Holds one registry per component role plus pipelines and extensions,
//! validates the graph on request, and emits the YAML document.
//!
//! `validate()` and `build()` are independent: building never validates,
//! so a graph with dangling references still produces a well-formed (if
//! incomplete) document. Callers decide which warnings block a rollout.

use serde_yaml::{Mapping, Value};

use crate::component::Component;
use crate::error::Result;
use crate::exporters::Exporter;
use crate::extensions::Extension;
use crate::pipeline::Pipeline;
use crate::processors::Processor;
use crate::receivers::Receiver;
use crate::registry::Registry;
use crate::telemetry::Environment;
use crate::validation;
use crate::warning::Warning;

/// Builder for an OpenTelemetry Collector configuration document
///
/// Registration is fluent and consumes the builder; `validate` and `build`
/// borrow it, so both can be called any number of times.
///
/// # Example
///
/// ```
/// use otelgen_config::{
///     BatchProcessor, CollectorConfigBuilder, Environment, OtlpExporter, OtlpReceiver,
///     Pipeline, TelemetryKind,
/// };
///
/// let builder = CollectorConfigBuilder::new(Environment::Development)
///     .add_receiver(OtlpReceiver::new("otlp"))
///     .add_processor(BatchProcessor::new("batch", TelemetryKind::Traces))
///     .add_exporter(OtlpExporter::new("otlp/tempo", "tempo:4317"))
///     .add_extension("health_check", 13133)
///     .add_pipeline(
///         Pipeline::new("default", TelemetryKind::Traces)
///             .receiver("otlp")
///             .processor("batch")
///             .exporter("otlp/tempo"),
///     );
///
/// assert!(builder.validate().is_empty());
/// let yaml = builder.build().unwrap();
/// assert!(yaml.contains("traces/default"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollectorConfigBuilder {
    environment: Environment,
    receivers: Registry<Receiver>,
    processors: Registry<Processor>,
    exporters: Registry<Exporter>,
    extensions: Registry<Extension>,
    pipelines: Registry<Pipeline>,
}

impl CollectorConfigBuilder {
    /// Create an empty builder targeting `environment`
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Register a receiver under its name
    #[must_use]
    pub fn add_receiver(mut self, receiver: impl Into<Receiver>) -> Self {
        let receiver = receiver.into();
        let name = receiver.name().to_string();
        log_registration("receiver", &name, receiver.type_name());
        if self.receivers.insert(name, receiver).is_some() {
            tracing::debug!(role = "receiver", "replaced existing registration");
        }
        self
    }

    /// Register a processor under its name
    #[must_use]
    pub fn add_processor(mut self, processor: impl Into<Processor>) -> Self {
        let processor = processor.into();
        let name = processor.name().to_string();
        log_registration("processor", &name, processor.type_name());
        if self.processors.insert(name, processor).is_some() {
            tracing::debug!(role = "processor", "replaced existing registration");
        }
        self
    }

    /// Register an exporter under its name
    #[must_use]
    pub fn add_exporter(mut self, exporter: impl Into<Exporter>) -> Self {
        let exporter = exporter.into();
        let name = exporter.name().to_string();
        log_registration("exporter", &name, exporter.type_name());
        if self.exporters.insert(name, exporter).is_some() {
            tracing::debug!(role = "exporter", "replaced existing registration");
        }
        self
    }

    /// Register an extension listening on the loopback host at `port`
    #[must_use]
    pub fn add_extension(self, name: impl Into<String>, port: u16) -> Self {
        self.add_extension_instance(Extension::on_port(name, port))
    }

    /// Register a fully specified extension
    #[must_use]
    pub fn add_extension_instance(mut self, extension: Extension) -> Self {
        let name = extension.name().to_string();
        log_registration("extension", &name, &name);
        if self.extensions.insert(name, extension).is_some() {
            tracing::debug!(role = "extension", "replaced existing registration");
        }
        self
    }

    /// Register a pipeline under `<kind>/<name>`
    #[must_use]
    pub fn add_pipeline(mut self, pipeline: Pipeline) -> Self {
        let key = pipeline.key();
        tracing::debug!(pipeline = %key, "pipeline registered");
        if self.pipelines.insert(key, pipeline).is_some() {
            tracing::debug!(role = "pipeline", "replaced existing registration");
        }
        self
    }

    /// Target environment
    #[inline]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Registered receivers
    #[inline]
    pub fn receivers(&self) -> &Registry<Receiver> {
        &self.receivers
    }

    /// Registered processors
    #[inline]
    pub fn processors(&self) -> &Registry<Processor> {
        &self.processors
    }

    /// Registered exporters
    #[inline]
    pub fn exporters(&self) -> &Registry<Exporter> {
        &self.exporters
    }

    /// Registered extensions
    #[inline]
    pub fn extensions(&self) -> &Registry<Extension> {
        &self.extensions
    }

    /// Registered pipelines, keyed by `<kind>/<name>`
    #[inline]
    pub fn pipelines(&self) -> &Registry<Pipeline> {
        &self.pipelines
    }

    /// Validate the whole graph against the target environment
    ///
    /// Never fails; every finding is returned in a fixed order.
    pub fn validate(&self) -> Vec<Warning> {
        let warnings = validation::validate_builder(self);
        tracing::debug!(
            environment = %self.environment,
            total = warnings.len(),
            structural = warnings.iter().filter(|w| w.is_structural()).count(),
            "collector config validated"
        );
        warnings
    }

    /// Assemble the document as a YAML value
    ///
    /// Disabled components and pipelines are skipped. Groups appear only
    /// when their registry is non-empty; `service` is always present.
    pub fn build_value(&self) -> Value {
        let mut config = Mapping::new();

        if !self.receivers.is_empty() {
            config.insert("receivers".into(), enabled_group(&self.receivers).into());
        }
        if !self.processors.is_empty() {
            config.insert("processors".into(), enabled_group(&self.processors).into());
        }
        if !self.exporters.is_empty() {
            config.insert("exporters".into(), enabled_group(&self.exporters).into());
        }

        if !self.extensions.is_empty() {
            let extensions: Mapping = self
                .extensions
                .iter()
                .map(|(name, ext)| (Value::from(name), Value::Mapping(ext.to_config())))
                .collect();
            config.insert("extensions".into(), extensions.into());
        }

        let mut service = Mapping::new();
        if !self.extensions.is_empty() {
            let names: Vec<Value> = self.extensions.names().map(Value::from).collect();
            service.insert("extensions".into(), Value::Sequence(names));
        }
        if !self.pipelines.is_empty() {
            let pipelines: Mapping = self
                .pipelines
                .iter()
                .filter(|(_, pipeline)| pipeline.enabled)
                .map(|(key, pipeline)| (Value::from(key), Value::Mapping(pipeline.to_config())))
                .collect();
            service.insert("pipelines".into(), pipelines.into());
        }
        config.insert("service".into(), service.into());

        Value::Mapping(config)
    }

    /// Render the document as YAML text
    ///
    /// Does not validate. Output is deterministic: key order follows
    /// registration order and repeated calls yield identical text.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` if the YAML emitter fails.
    pub fn build(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(&self.build_value())?;
        tracing::info!(
            environment = %self.environment,
            receivers = self.receivers.len(),
            processors = self.processors.len(),
            exporters = self.exporters.len(),
            extensions = self.extensions.len(),
            pipelines = self.pipelines.len(),
            "collector config built"
        );
        Ok(yaml)
    }
}

/// Project the enabled members of a registry, keeping registration order
fn enabled_group<C: Component>(registry: &Registry<C>) -> Mapping {
    registry
        .iter()
        .filter(|(_, component)| component.is_enabled())
        .map(|(name, component)| (Value::from(name), Value::Mapping(component.to_config())))
        .collect()
}

#[inline]
fn log_registration(role: &'static str, name: &str, type_name: &str) {
    tracing::debug!(role, name, component_type = type_name, "component registered");
}
