//! Generate a metrics + traces collector config
//!
//! ```sh
//! cargo run -p otelgen-config --example standard_stack [settings.toml]
//! ```
//!
//! Warnings go to the log; the YAML document goes to stdout.

use otelgen_config::{
    AttributesProcessor, BatchProcessor, CollectorConfigBuilder, ConfigError, LogConfig,
    LogFormat, MemoryLimiterProcessor, OtlpExporter, OtlpReceiver, Pipeline, PrometheusReceiver,
    PrometheusRemoteWriteExporter, Settings, TelemetryKind, has_structural,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging(log: &LogConfig) {
    let filter =
        EnvFilter::try_new(log.filter_directive()).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the document, so logs go to stderr
    match log.format {
        LogFormat::Console => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .with(filter)
            .init(),
    }
}

fn standard_stack(builder: CollectorConfigBuilder) -> CollectorConfigBuilder {
    builder
        .add_receiver(OtlpReceiver::new("otlp"))
        .add_receiver(
            PrometheusReceiver::new("prometheus")
                .add_scrape_config("collector", ["127.0.0.1:8888"]),
        )
        .add_processor(MemoryLimiterProcessor::default().with_limits(1024, 256))
        .add_processor(BatchProcessor::new("batch/metrics", TelemetryKind::Metrics))
        .add_processor(BatchProcessor::new("batch/traces", TelemetryKind::Traces))
        .add_processor(AttributesProcessor::default().add_action(
            "delete",
            "http.request.header.authorization",
            None,
        ))
        .add_exporter(OtlpExporter::new("otlp/tempo", "tempo:4317"))
        .add_exporter(PrometheusRemoteWriteExporter::new(
            "prometheusremotewrite",
            "https://mimir:9009/api/v1/push",
        ))
        .add_extension("health_check", 13133)
        .add_pipeline(
            Pipeline::new("default", TelemetryKind::Metrics)
                .with_receivers(["otlp", "prometheus"])
                .with_processors(["memory_limiter", "batch/metrics"])
                .exporter("prometheusremotewrite"),
        )
        .add_pipeline(
            Pipeline::new("default", TelemetryKind::Traces)
                .receiver("otlp")
                .with_processors(["memory_limiter", "attributes", "batch/traces"])
                .exporter("otlp/tempo"),
        )
}

fn main() -> Result<(), ConfigError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    init_logging(&settings.log);

    let builder = standard_stack(settings.builder());

    let warnings = builder.validate();
    for warning in &warnings {
        if warning.is_structural() {
            tracing::error!("{}", warning.message);
        } else {
            tracing::warn!("{}", warning.message);
        }
    }
    if has_structural(&warnings) {
        tracing::error!(count = warnings.len(), "config has broken wiring");
    }

    print!("{}", builder.build()?);
    Ok(())
}
