//! Integration tests for collector document generation
//!
//! Builds realistic stacks through the public API and parses the emitted
//! YAML back to check what the collector would actually load.

use serde_yaml::Value;

use otelgen_config::{
    AttributesProcessor, BatchProcessor, CollectorConfigBuilder, ConfigError, Endpoint,
    Environment, LabelConfig, MemoryLimiterProcessor, OtlpExporter, OtlpReceiver, Pipeline,
    PrometheusReceiver, PrometheusRemoteWriteExporter, RetryConfig, ScrapeJob, Severity,
    TelemetryKind, TlsConfig, has_structural,
};

fn standard_stack(environment: Environment) -> CollectorConfigBuilder {
    CollectorConfigBuilder::new(environment)
        .add_receiver(OtlpReceiver::new("otlp"))
        .add_receiver(
            PrometheusReceiver::new("prometheus").add_scrape_job(
                ScrapeJob::new("node", ["node-exporter:9100"])
                    .with_scrape_interval("30s")
                    .with_relabel_config(LabelConfig::new(
                        ["__address__"],
                        "(.*):9100",
                        "instance",
                        "$1",
                    )),
            ),
        )
        .add_processor(MemoryLimiterProcessor::default())
        .add_processor(BatchProcessor::new("batch/metrics", TelemetryKind::Metrics))
        .add_processor(BatchProcessor::new("batch/traces", TelemetryKind::Traces))
        .add_processor(
            AttributesProcessor::default()
                .add_action("upsert", "deployment.environment", Some(environment.as_str()))
                .add_action("delete", "http.request.header.authorization", None),
        )
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

fn parse(builder: &CollectorConfigBuilder) -> Value {
    serde_yaml::from_str(&builder.build().unwrap()).unwrap()
}

fn strings(value: &Value) -> Vec<&str> {
    value
        .as_sequence()
        .map(|seq| seq.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn test_standard_stack_is_clean_in_production() {
    let warnings = standard_stack(Environment::Production).validate();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn test_standard_stack_document() {
    let doc = parse(&standard_stack(Environment::Production));

    let otlp = &doc["receivers"]["otlp"]["protocols"];
    assert_eq!(otlp["grpc"]["endpoint"].as_str(), Some("127.0.0.1:4317"));
    assert_eq!(otlp["grpc"]["compression"].as_str(), Some("gzip"));
    assert_eq!(otlp["grpc"]["tls"]["insecure"].as_bool(), Some(false));
    assert_eq!(otlp["http"]["endpoint"].as_str(), Some("127.0.0.1:4318"));
    assert_eq!(otlp["http"]["include_metadata"].as_bool(), Some(true));

    let prom = &doc["receivers"]["prometheus"]["config"];
    assert_eq!(prom["global"]["scrape_interval"].as_str(), Some("15s"));
    assert_eq!(prom["global"]["scrape_timeout"].as_str(), Some("10s"));
    let job = &prom["scrape_configs"][0];
    assert_eq!(job["job_name"].as_str(), Some("node"));
    assert_eq!(strings(&job["static_configs"][0]["targets"]), ["node-exporter:9100"]);
    assert_eq!(job["scrape_interval"].as_str(), Some("30s"));
    assert_eq!(job["relabel_configs"][0]["regex"].as_str(), Some("(.*):9100"));
    assert_eq!(job["relabel_configs"][0]["target_label"].as_str(), Some("instance"));

    let limiter = &doc["processors"]["memory_limiter"];
    assert_eq!(limiter["check_interval"].as_str(), Some("1s"));
    assert_eq!(limiter["limit_mib"].as_u64(), Some(512));
    assert_eq!(limiter["spike_limit_mib"].as_u64(), Some(128));

    let metrics_batch = &doc["processors"]["batch/metrics"];
    assert_eq!(metrics_batch["send_batch_size"].as_u64(), Some(1024));
    assert_eq!(metrics_batch["send_batch_max_size"].as_u64(), Some(2048));
    assert_eq!(metrics_batch["timeout"].as_str(), Some("5s"));

    let traces_batch = &doc["processors"]["batch/traces"];
    assert_eq!(traces_batch["send_batch_size"].as_u64(), Some(256));
    assert_eq!(traces_batch["timeout"].as_str(), Some("1s"));

    let actions = &doc["processors"]["attributes"]["actions"];
    assert_eq!(actions[0]["action"].as_str(), Some("upsert"));
    assert_eq!(actions[0]["value"].as_str(), Some("prod"));
    assert_eq!(actions[1]["action"].as_str(), Some("delete"));
    assert!(actions[1].get("value").is_none());

    let tempo = &doc["exporters"]["otlp/tempo"];
    assert_eq!(tempo["endpoint"].as_str(), Some("tempo:4317"));
    assert_eq!(tempo["retry_on_failure"]["max_elapsed_time"].as_str(), Some("300s"));
    assert_eq!(tempo["sending_queue"]["queue_size"].as_u64(), Some(800));

    let prw = &doc["exporters"]["prometheusremotewrite"];
    assert_eq!(prw["timeout"].as_str(), Some("30s"));
    assert_eq!(prw["add_metric_suffixes"].as_bool(), Some(false));
    assert_eq!(
        prw["resource_to_telemetry_conversion"]["enabled"].as_bool(),
        Some(true)
    );

    assert_eq!(
        doc["extensions"]["health_check"]["endpoint"].as_str(),
        Some("127.0.0.1:13133")
    );
    assert_eq!(strings(&doc["service"]["extensions"]), ["health_check"]);

    let pipelines = &doc["service"]["pipelines"];
    assert_eq!(strings(&pipelines["metrics/default"]["receivers"]), ["otlp", "prometheus"]);
    assert_eq!(
        strings(&pipelines["traces/default"]["processors"]),
        ["memory_limiter", "attributes", "batch/traces"]
    );
    assert_eq!(strings(&pipelines["traces/default"]["exporters"]), ["otlp/tempo"]);
}

#[test]
fn test_every_pipeline_reference_resolves() {
    let doc = parse(&standard_stack(Environment::Development));
    let pipelines = doc["service"]["pipelines"].as_mapping().unwrap();

    for (key, pipeline) in pipelines {
        for (role, group) in [
            ("receivers", "receivers"),
            ("processors", "processors"),
            ("exporters", "exporters"),
        ] {
            for name in strings(&pipeline[role]) {
                assert!(
                    doc[group].get(name).is_some(),
                    "{key:?} references missing {role} {name}"
                );
            }
        }
    }
}

#[test]
fn test_insecure_production_stack_warns_without_failing() {
    let builder = CollectorConfigBuilder::new(Environment::Production)
        .add_receiver(
            OtlpReceiver::new("otlp")
                .with_grpc_endpoint(Endpoint::new("0.0.0.0", 4317))
                .with_http_tls(TlsConfig::disabled()),
        )
        .add_processor(BatchProcessor::new("batch", TelemetryKind::Logs))
        .add_exporter(
            OtlpExporter::new("otlp/loki", "loki:4317")
                .with_tls(TlsConfig::insecure())
                .with_retry(RetryConfig::disabled()),
        )
        .add_pipeline(
            Pipeline::new("default", TelemetryKind::Logs)
                .receiver("otlp")
                .processor("batch")
                .exporter("otlp/loki"),
        );

    let warnings = builder.validate();
    assert_eq!(warnings.len(), 3);
    assert!(warnings.iter().all(|w| w.severity == Severity::Advisory));
    assert!(warnings[0].message.contains("0.0.0.0:4317"));
    assert!(warnings[1].message.contains("HTTP TLS"));
    assert!(warnings[2].message.starts_with("otlp/loki:"));

    let doc = parse(&builder);
    let exporter = &doc["exporters"]["otlp/loki"];
    assert_eq!(exporter["tls"]["insecure"].as_bool(), Some(true));
    assert_eq!(exporter["retry_on_failure"]["enabled"].as_bool(), Some(false));
    assert!(doc["receivers"]["otlp"]["protocols"]["http"].get("tls").is_none());
}

#[test]
fn test_dev_environment_skips_production_policy() {
    let builder = CollectorConfigBuilder::new(Environment::Development)
        .add_receiver(OtlpReceiver::new("otlp").with_grpc_endpoint(Endpoint::new("0.0.0.0", 4317)))
        .add_processor(BatchProcessor::new("batch", TelemetryKind::Traces))
        .add_exporter(PrometheusRemoteWriteExporter::new("prw", "http://mimir/push"))
        .add_pipeline(
            Pipeline::new("default", TelemetryKind::Traces)
                .receiver("otlp")
                .processor("batch")
                .exporter("prw"),
        );
    assert!(builder.validate().is_empty());
}

#[test]
fn test_structural_findings_gate_rollout() {
    let builder = standard_stack(Environment::Staging).add_pipeline(
        Pipeline::new("audit", TelemetryKind::Logs)
            .receiver("otlp")
            .processor("batch/logs")
            .exporter("otlp/loki"),
    );
    let warnings = builder.validate();

    assert!(has_structural(&warnings));
    let rendered: Vec<String> = warnings.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            "error: pipeline audit: processor 'batch/logs' does not exist",
            "error: pipeline audit: exporter 'otlp/loki' does not exist",
        ]
    );
    assert!(builder.build().is_ok());
}

#[test]
fn test_batch_kind_from_string() {
    let batch = BatchProcessor::for_kind_name("batch", "logs").unwrap();
    let doc = parse(&CollectorConfigBuilder::new(Environment::Development).add_processor(batch));
    assert_eq!(doc["processors"]["batch"]["send_batch_size"].as_u64(), Some(512));

    let err = BatchProcessor::for_kind_name("batch", "profiles").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTelemetryKind { .. }));
}

#[test]
fn test_output_is_deterministic_across_builders() {
    let first = standard_stack(Environment::Production).build().unwrap();
    let second = standard_stack(Environment::Production).build().unwrap();
    assert_eq!(first, second);
}
