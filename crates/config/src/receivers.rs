//! Receiver components
//!
//! Receivers describe how telemetry enters the collector.
//!
//! # Example
//!
//! ```
//! use otelgen_config::{Endpoint, OtlpReceiver, PrometheusReceiver, Receiver};
//!
//! let otlp: Receiver = OtlpReceiver::new("otlp")
//!     .with_grpc_endpoint(Endpoint::new("0.0.0.0", 4317))
//!     .into();
//!
//! let prometheus: Receiver = PrometheusReceiver::default()
//!     .add_scrape_config("node", ["node-exporter:9100"])
//!     .into();
//! # let _ = (otlp, prometheus);
//! ```

use serde_yaml::{Mapping, Value};

use crate::component::Component;
use crate::endpoint::{DEFAULT_GRPC_PORT, DEFAULT_HTTP_PORT, Endpoint};
use crate::telemetry::Environment;
use crate::tls::TlsConfig;
use crate::warning::Warning;

/// A receiver instance
#[derive(Debug, Clone)]
pub enum Receiver {
    /// OTLP over gRPC and HTTP
    Otlp(OtlpReceiver),
    /// Prometheus scraper
    Prometheus(PrometheusReceiver),
}

impl Component for Receiver {
    fn name(&self) -> &str {
        match self {
            Self::Otlp(c) => c.name(),
            Self::Prometheus(c) => c.name(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Otlp(c) => c.type_name(),
            Self::Prometheus(c) => c.type_name(),
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            Self::Otlp(c) => c.enabled,
            Self::Prometheus(c) => c.enabled,
        }
    }

    fn to_config(&self) -> Mapping {
        match self {
            Self::Otlp(c) => c.to_config(),
            Self::Prometheus(c) => c.to_config(),
        }
    }

    fn validate(&self, environment: Environment) -> Vec<Warning> {
        match self {
            Self::Otlp(c) => c.validate(environment),
            Self::Prometheus(c) => c.validate(environment),
        }
    }
}

impl From<OtlpReceiver> for Receiver {
    fn from(receiver: OtlpReceiver) -> Self {
        Self::Otlp(receiver)
    }
}

impl From<PrometheusReceiver> for Receiver {
    fn from(receiver: PrometheusReceiver) -> Self {
        Self::Prometheus(receiver)
    }
}

// =============================================================================
// OTLP
// =============================================================================

/// OTLP receiver listening on gRPC and HTTP
#[derive(Debug, Clone)]
pub struct OtlpReceiver {
    /// Instance name
    pub name: String,

    /// Whether the receiver is emitted
    /// Default: true
    pub enabled: bool,

    /// gRPC listen address
    /// Default: 127.0.0.1:4317
    pub grpc_endpoint: Endpoint,

    /// HTTP listen address
    /// Default: 127.0.0.1:4318
    pub http_endpoint: Endpoint,

    /// gRPC compression
    /// Default: gzip
    pub grpc_compression: String,

    /// gRPC TLS settings
    pub grpc_tls: TlsConfig,

    /// HTTP TLS settings
    pub http_tls: TlsConfig,

    /// Propagate client metadata on the HTTP protocol
    /// Default: true
    pub include_metadata: bool,
}

impl OtlpReceiver {
    /// Create a receiver with loopback endpoints and default TLS
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            grpc_endpoint: Endpoint::localhost(DEFAULT_GRPC_PORT),
            http_endpoint: Endpoint::localhost(DEFAULT_HTTP_PORT),
            grpc_compression: "gzip".to_string(),
            grpc_tls: TlsConfig::default(),
            http_tls: TlsConfig::default(),
            include_metadata: true,
        }
    }

    /// Set the gRPC endpoint
    #[must_use]
    pub fn with_grpc_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.grpc_endpoint = endpoint;
        self
    }

    /// Set the HTTP endpoint
    #[must_use]
    pub fn with_http_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.http_endpoint = endpoint;
        self
    }

    /// Set gRPC TLS
    #[must_use]
    pub fn with_grpc_tls(mut self, tls: TlsConfig) -> Self {
        self.grpc_tls = tls;
        self
    }

    /// Set HTTP TLS
    #[must_use]
    pub fn with_http_tls(mut self, tls: TlsConfig) -> Self {
        self.http_tls = tls;
        self
    }

    /// Toggle HTTP metadata propagation
    #[must_use]
    pub fn with_include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Keep the receiver registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Component for OtlpReceiver {
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
        let mut grpc = Mapping::new();
        grpc.insert("endpoint".into(), self.grpc_endpoint.address().into());
        grpc.insert(
            "compression".into(),
            self.grpc_compression.as_str().into(),
        );
        if self.grpc_tls.enabled {
            grpc.insert("tls".into(), self.grpc_tls.to_config().into());
        }

        let mut http = Mapping::new();
        http.insert("endpoint".into(), self.http_endpoint.address().into());
        http.insert("include_metadata".into(), self.include_metadata.into());
        if self.http_tls.enabled {
            http.insert("tls".into(), self.http_tls.to_config().into());
        }

        let mut protocols = Mapping::new();
        protocols.insert("grpc".into(), grpc.into());
        protocols.insert("http".into(), http.into());

        let mut config = Mapping::new();
        config.insert("protocols".into(), protocols.into());
        config
    }

    fn validate(&self, environment: Environment) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if !environment.is_production() {
            return warnings;
        }

        if !self.grpc_endpoint.is_loopback() {
            warnings.push(Warning::advisory(format!(
                "{}: gRPC endpoint {} is exposed beyond loopback in production",
                self.name, self.grpc_endpoint
            )));
        }
        if !self.http_endpoint.is_loopback() {
            warnings.push(Warning::advisory(format!(
                "{}: HTTP endpoint {} is exposed beyond loopback in production",
                self.name, self.http_endpoint
            )));
        }
        if !self.grpc_tls.is_secure() {
            warnings.push(Warning::advisory(format!(
                "{}: gRPC TLS is disabled or insecure in production",
                self.name
            )));
        }
        if !self.http_tls.is_secure() {
            warnings.push(Warning::advisory(format!(
                "{}: HTTP TLS is disabled or insecure in production",
                self.name
            )));
        }

        warnings
    }
}

// =============================================================================
// Prometheus
// =============================================================================

/// Prometheus relabeling rule attached to a scrape job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConfig {
    /// Labels whose values are concatenated and matched
    pub source_labels: Vec<String>,
    /// Regular expression applied to the concatenated value
    pub regex: String,
    /// Label that receives the replacement
    pub target_label: String,
    /// Replacement template
    pub replacement: String,
}

impl LabelConfig {
    /// Create a relabeling rule
    pub fn new(
        source_labels: impl IntoIterator<Item = impl Into<String>>,
        regex: impl Into<String>,
        target_label: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            source_labels: source_labels.into_iter().map(Into::into).collect(),
            regex: regex.into(),
            target_label: target_label.into(),
            replacement: replacement.into(),
        }
    }

    /// Project into a `relabel_configs` entry
    pub fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert(
            "source_labels".into(),
            self.source_labels.clone().into(),
        );
        config.insert("regex".into(), self.regex.as_str().into());
        config.insert("target_label".into(), self.target_label.as_str().into());
        config.insert("replacement".into(), self.replacement.as_str().into());
        config
    }
}

/// A single Prometheus scrape job with static targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeJob {
    /// Job name
    pub job_name: String,
    /// `host:port` targets
    pub targets: Vec<String>,
    /// Per-job override of the global scrape interval
    pub scrape_interval: Option<String>,
    /// Relabeling rules, emitted only when non-empty
    pub relabel_configs: Vec<LabelConfig>,
}

impl ScrapeJob {
    /// Create a job scraping `targets`
    pub fn new(
        job_name: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            scrape_interval: None,
            relabel_configs: Vec::new(),
        }
    }

    /// Override the scrape interval for this job
    #[must_use]
    pub fn with_scrape_interval(mut self, interval: impl Into<String>) -> Self {
        self.scrape_interval = Some(interval.into());
        self
    }

    /// Append a relabeling rule
    #[must_use]
    pub fn with_relabel_config(mut self, relabel: LabelConfig) -> Self {
        self.relabel_configs.push(relabel);
        self
    }

    /// Project into a `scrape_configs` entry
    pub fn to_config(&self) -> Mapping {
        let mut static_config = Mapping::new();
        static_config.insert("targets".into(), self.targets.clone().into());

        let mut config = Mapping::new();
        config.insert("job_name".into(), self.job_name.as_str().into());
        config.insert(
            "static_configs".into(),
            Value::Sequence(vec![static_config.into()]),
        );
        if !self.relabel_configs.is_empty() {
            let relabels = self
                .relabel_configs
                .iter()
                .map(|r| Value::Mapping(r.to_config()))
                .collect();
            config.insert("relabel_configs".into(), Value::Sequence(relabels));
        }
        if let Some(interval) = self.scrape_interval.as_deref().filter(|i| !i.is_empty()) {
            config.insert("scrape_interval".into(), interval.into());
        }
        config
    }
}

/// Prometheus receiver with an embedded scrape configuration
#[derive(Debug, Clone)]
pub struct PrometheusReceiver {
    /// Instance name
    /// Default: prometheus
    pub name: String,

    /// Whether the receiver is emitted
    /// Default: true
    pub enabled: bool,

    /// Global scrape interval
    /// Default: 15s
    pub scrape_interval: String,

    /// Global scrape timeout
    /// Default: 10s
    pub scrape_timeout: String,

    /// Rule evaluation interval
    /// Default: 15s
    pub evaluation_interval: String,

    /// Scrape jobs in registration order
    pub scrape_configs: Vec<ScrapeJob>,
}

impl Default for PrometheusReceiver {
    fn default() -> Self {
        Self::new("prometheus")
    }
}

impl PrometheusReceiver {
    /// Create a receiver with default intervals and no jobs
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            scrape_interval: "15s".to_string(),
            scrape_timeout: "10s".to_string(),
            evaluation_interval: "15s".to_string(),
            scrape_configs: Vec::new(),
        }
    }

    /// Override the global intervals
    #[must_use]
    pub fn with_intervals(
        mut self,
        scrape_interval: impl Into<String>,
        scrape_timeout: impl Into<String>,
        evaluation_interval: impl Into<String>,
    ) -> Self {
        self.scrape_interval = scrape_interval.into();
        self.scrape_timeout = scrape_timeout.into();
        self.evaluation_interval = evaluation_interval.into();
        self
    }

    /// Add a job with static targets and global defaults
    #[must_use]
    pub fn add_scrape_config(
        self,
        job_name: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.add_scrape_job(ScrapeJob::new(job_name, targets))
    }

    /// Add a fully specified job
    #[must_use]
    pub fn add_scrape_job(mut self, job: ScrapeJob) -> Self {
        self.scrape_configs.push(job);
        self
    }

    /// Keep the receiver registered but out of the document
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Component for PrometheusReceiver {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "prometheus"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn to_config(&self) -> Mapping {
        let mut global = Mapping::new();
        global.insert("scrape_interval".into(), self.scrape_interval.as_str().into());
        global.insert("scrape_timeout".into(), self.scrape_timeout.as_str().into());
        global.insert(
            "evaluation_interval".into(),
            self.evaluation_interval.as_str().into(),
        );

        let jobs = self
            .scrape_configs
            .iter()
            .map(|job| Value::Mapping(job.to_config()))
            .collect();

        let mut inner = Mapping::new();
        inner.insert("global".into(), global.into());
        inner.insert("scrape_configs".into(), Value::Sequence(jobs));

        let mut config = Mapping::new();
        config.insert("config".into(), inner.into());
        config
    }

    fn validate(&self, _environment: Environment) -> Vec<Warning> {
        if self.scrape_configs.is_empty() {
            return vec![Warning::advisory(format!(
                "{}: no scrape configs registered",
                self.name
            ))];
        }
        Vec::new()
    }
}
