//! OpenTelemetry Collector configuration generator
//!
//! Assemble a collector configuration from typed components, check it against
//! deployment policy, and emit the YAML document the collector loads.
//!
//! Components are registered by name in one of three roles (receiver,
//! processor, exporter). Pipelines wire those names together per telemetry
//! kind. Validation never fails: it returns [`Warning`]s, each marked
//! advisory or structural, and leaves the rollout decision to the caller.
//!
//! ```
//! use otelgen_config::{
//!     BatchProcessor, CollectorConfigBuilder, Environment, MemoryLimiterProcessor,
//!     OtlpExporter, OtlpReceiver, Pipeline, TelemetryKind, has_structural,
//! };
//!
//! let builder = CollectorConfigBuilder::new(Environment::Development)
//!     .add_receiver(OtlpReceiver::new("otlp"))
//!     .add_processor(MemoryLimiterProcessor::default())
//!     .add_processor(BatchProcessor::new("batch", TelemetryKind::Metrics))
//!     .add_exporter(OtlpExporter::new("otlp/backend", "backend:4317"))
//!     .add_pipeline(
//!         Pipeline::new("default", TelemetryKind::Metrics)
//!             .receiver("otlp")
//!             .processor("memory_limiter")
//!             .processor("batch")
//!             .exporter("otlp/backend"),
//!     );
//!
//! assert!(!has_structural(&builder.validate()));
//! let yaml = builder.build().unwrap();
//! assert!(yaml.contains("metrics/default"));
//! ```
//!
//! # Settings
//!
//! The generator's own settings (target environment, log level) load from
//! TOML via [`Settings`]:
//!
//! ```
//! use otelgen_config::{Environment, Settings};
//! use std::str::FromStr;
//!
//! let settings = Settings::from_str("[generator]\nenvironment = \"prod\"").unwrap();
//! assert_eq!(settings.builder().environment(), Environment::Production);
//! ```

mod builder;
mod component;
mod endpoint;
mod error;
mod exporters;
mod extensions;
mod logging;
mod pipeline;
mod processors;
mod receivers;
mod registry;
mod retry;
mod settings;
mod telemetry;
mod tls;
mod validation;
mod warning;


pub use builder::CollectorConfigBuilder;
pub use component::Component;
pub use endpoint::{DEFAULT_GRPC_PORT, DEFAULT_HOST, DEFAULT_HTTP_PORT, Endpoint};
pub use error::{ConfigError, Result};
pub use exporters::{Exporter, OtlpExporter, PrometheusRemoteWriteExporter};
pub use extensions::Extension;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use pipeline::Pipeline;
pub use processors::{
    AttributeAction, AttributesProcessor, BatchDefaults, BatchProcessor, KNOWN_ATTRIBUTE_ACTIONS,
    MemoryLimiterProcessor, Processor,
};
pub use receivers::{LabelConfig, OtlpReceiver, PrometheusReceiver, Receiver, ScrapeJob};
pub use registry::Registry;
pub use retry::RetryConfig;
pub use settings::{GeneratorSettings, Settings};
pub use telemetry::{Environment, TelemetryKind};
pub use tls::TlsConfig;
pub use warning::{Severity, Warning, has_structural};
