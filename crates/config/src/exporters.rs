//! Exporter components
//!
//! Exporters describe where processed telemetry is sent.

use serde_yaml::Mapping;

use crate::component::Component;
use crate::retry::RetryConfig;
use crate::telemetry::Environment;
use crate::tls::TlsConfig;
use crate::warning::Warning;

/// An exporter instance
#[derive(Debug, Clone)]
pub enum Exporter {
    /// OTLP over gRPC
    Otlp(OtlpExporter),
    /// Prometheus remote write
    PrometheusRemoteWrite(PrometheusRemoteWriteExporter),
}

impl Component for Exporter {
    fn name(&self) -> &str {
        match self {
            Self::Otlp(c) => c.name(),
            Self::PrometheusRemoteWrite(c) => c.name(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Otlp(c) => c.type_name(),
            Self::PrometheusRemoteWrite(c) => c.type_name(),
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            Self::Otlp(c) => c.enabled,
            Self::PrometheusRemoteWrite(c) => c.enabled,
        }
    }

    fn to_config(&self) -> Mapping {
        match self {
            Self::Otlp(c) => c.to_config(),
            Self::PrometheusRemoteWrite(c) => c.to_config(),
        }
    }

    fn validate(&self, environment: Environment) -> Vec<Warning> {
        match self {
            Self::Otlp(c) => c.validate(environment),
            Self::PrometheusRemoteWrite(c) => c.validate(environment),
        }
    }
}

impl From<OtlpExporter> for Exporter {
    fn from(exporter: OtlpExporter) -> Self {
        Self::Otlp(exporter)
    }
}

impl From<PrometheusRemoteWriteExporter> for Exporter {
    fn from(exporter: PrometheusRemoteWriteExporter) -> Self {
        Self::PrometheusRemoteWrite(exporter)
    }
}

/// OTLP exporter
#[derive(Debug, Clone)]
pub struct OtlpExporter {
    /// Instance name
    pub name: String,

    /// Whether the exporter is emitted
    /// Default: true
    pub enabled: bool,

    /// Destination (`host:port` or URL)
    pub endpoint: String,

    /// Payload compression
    /// Default: gzip
    pub compression: String,

    /// TLS settings; the block is emitted only when enabled
    pub tls: TlsConfig,

    /// Retry policy
    pub retry: RetryConfig,

    /// Whether the sending queue is enabled
    /// Default: true
    pub queue_enabled: bool,

    /// Sending queue capacity in batches
    /// Default: 800
    pub queue_size: u32,
}

impl OtlpExporter {
    /// Create an exporter with default TLS, retry and queue settings
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            endpoint: endpoint.into(),
            compression: "gzip".to_string(),
            tls: TlsConfig::default(),
            retry: RetryConfig::default(),
            queue_enabled: true,
            queue_size: 800,
        }
    }

    /// Set TLS
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Configure the sending queue
    #[must_use]
    pub fn with_queue(mut self, enabled: bool, size: u32) -> Self {
        self.queue_enabled = enabled;
        self.queue_size = size;
        self
    }

    /// Keep the exporter registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Component for OtlpExporter {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "otlp"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn to_config(&self) -> Mapping {
        let mut queue = Mapping::new();
        queue.insert("enabled".into(), self.queue_enabled.into());
        queue.insert("queue_size".into(), self.queue_size.into());

        let mut config = Mapping::new();
        config.insert("endpoint".into(), self.endpoint.as_str().into());
        config.insert("compression".into(), self.compression.as_str().into());
        config.insert("retry_on_failure".into(), self.retry.to_config().into());
        config.insert("sending_queue".into(), queue.into());
        if self.tls.enabled {
            config.insert("tls".into(), self.tls.to_config().into());
        }
        config
    }

    fn validate(&self, environment: Environment) -> Vec<Warning> {
        if environment.is_production() && !self.tls.is_secure() {
            return vec![Warning::advisory(format!(
                "{}: TLS is disabled or insecure in production",
                self.name
            ))];
        }
        Vec::new()
    }
}

/// Prometheus remote-write exporter
#[derive(Debug, Clone)]
pub struct PrometheusRemoteWriteExporter {
    /// Instance name
    pub name: String,

    /// Whether the exporter is emitted
    /// Default: true
    pub enabled: bool,

    /// Remote-write URL
    pub endpoint: String,

    /// Request timeout
    /// Default: 30s
    pub timeout: String,

    /// Send metric metadata
    /// Default: true
    pub send_metadata: bool,

    /// Append type/unit suffixes to metric names
    /// Default: false
    pub add_metric_suffixes: bool,

    /// Retry policy
    pub retry: RetryConfig,

    /// Copy resource attributes onto every series
    /// Default: true
    pub resource_to_telemetry_conversion: bool,
}

impl PrometheusRemoteWriteExporter {
    /// Create an exporter with default settings
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            endpoint: endpoint.into(),
            timeout: "30s".to_string(),
            send_metadata: true,
            add_metric_suffixes: false,
            retry: RetryConfig::default(),
            resource_to_telemetry_conversion: true,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Toggle metric name suffixes
    #[must_use]
    pub fn with_metric_suffixes(mut self, enabled: bool) -> Self {
        self.add_metric_suffixes = enabled;
        self
    }

    /// Keep the exporter registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check whether the endpoint uses TLS
    #[inline]
    pub fn is_https(&self) -> bool {
        self.endpoint.starts_with("https://")
    }
}

impl Component for PrometheusRemoteWriteExporter {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "prometheusremotewrite"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn to_config(&self) -> Mapping {
        let mut conversion = Mapping::new();
        conversion.insert(
            "enabled".into(),
            self.resource_to_telemetry_conversion.into(),
        );

        let mut config = Mapping::new();
        config.insert("endpoint".into(), self.endpoint.as_str().into());
        config.insert("timeout".into(), self.timeout.as_str().into());
        config.insert("send_metadata".into(), self.send_metadata.into());
        config.insert(
            "add_metric_suffixes".into(),
            self.add_metric_suffixes.into(),
        );
        config.insert("retry_on_failure".into(), self.retry.to_config().into());
        config.insert(
            "resource_to_telemetry_conversion".into(),
            conversion.into(),
        );
        config
    }

    fn validate(&self, environment: Environment) -> Vec<Warning> {
        if environment.is_production() && !self.is_https() {
            return vec![Warning::advisory(format!(
                "{}: endpoint {} does not use https in production",
                self.name, self.endpoint
            ))];
        }
        Vec::new()
    }
}
