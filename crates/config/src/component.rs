//! Shared component contract

use serde_yaml::Mapping;

use crate::telemetry::Environment;
use crate::warning::Warning;

/// Capability shared by receivers, processors and exporters
///
/// `to_config` is a pure projection into the collector's wire schema and
/// `validate` only reports advisory findings; neither can fail.
pub trait Component {
    /// Instance name, unique within its role
    fn name(&self) -> &str;

    /// Collector component type (`otlp`, `batch`, ...)
    fn type_name(&self) -> &'static str;

    /// Disabled components are validated but not emitted
    fn is_enabled(&self) -> bool;

    /// Project into the collector's mapping for this component
    fn to_config(&self) -> Mapping;

    /// Check the component against policy for `environment`
    fn validate(&self, environment: Environment) -> Vec<Warning>;
}
