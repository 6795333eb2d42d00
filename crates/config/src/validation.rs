//! Builder-wide validation
//!
//! Runs every check and collects findings; nothing short-circuits.
//!
//! Order:
//! - receivers, processors, exporters (per-component policy)
//! - per pipeline: wiring rules, then references into each registry
//! - missing pipelines

use crate::builder::CollectorConfigBuilder;
use crate::component::Component;
use crate::pipeline::Pipeline;
use crate::registry::Registry;
use crate::telemetry::Environment;
use crate::warning::Warning;

/// Validate the whole component graph
pub fn validate_builder(builder: &CollectorConfigBuilder) -> Vec<Warning> {
    let environment = builder.environment();
    let mut warnings = Vec::new();

    validate_components(builder.receivers(), environment, &mut warnings);
    validate_components(builder.processors(), environment, &mut warnings);
    validate_components(builder.exporters(), environment, &mut warnings);

    for pipeline in builder.pipelines().values() {
        warnings.extend(pipeline.validate());
        validate_references(builder, pipeline, &mut warnings);
    }

    if builder.pipelines().is_empty() {
        warnings.push(Warning::structural("no pipelines configured"));
    }

    warnings
}

fn validate_components<C: Component>(
    registry: &Registry<C>,
    environment: Environment,
    warnings: &mut Vec<Warning>,
) {
    for component in registry.values() {
        warnings.extend(component.validate(environment));
    }
}

/// Every name a pipeline references must be registered in the matching role
fn validate_references(
    builder: &CollectorConfigBuilder,
    pipeline: &Pipeline,
    warnings: &mut Vec<Warning>,
) {
    check_names(
        &pipeline.name,
        "receiver",
        &pipeline.receivers,
        builder.receivers(),
        warnings,
    );
    check_names(
        &pipeline.name,
        "processor",
        &pipeline.processors,
        builder.processors(),
        warnings,
    );
    check_names(
        &pipeline.name,
        "exporter",
        &pipeline.exporters,
        builder.exporters(),
        warnings,
    );
}

fn check_names<T>(
    pipeline: &str,
    role: &str,
    referenced: &[String],
    registry: &Registry<T>,
    warnings: &mut Vec<Warning>,
) {
    for name in referenced {
        if !registry.contains(name) {
            warnings.push(Warning::structural(format!(
                "pipeline {pipeline}: {role} '{name}' does not exist"
            )));
        }
    }
}
