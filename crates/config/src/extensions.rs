//! Extensions
//!
//! Auxiliary services such as `health_check` or `pprof`. They sit outside
//! the data path, have no enabled flag and are not policy-checked.

use serde_yaml::Mapping;

use crate::endpoint::Endpoint;

/// An extension bound to an endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension name (also its collector type, e.g. `health_check`)
    pub name: String,
    /// Listen address
    pub endpoint: Endpoint,
}

impl Extension {
    /// Create an extension listening on `endpoint`
    pub fn new(name: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            name: name.into(),
            endpoint,
        }
    }

    /// Create an extension on the default loopback host
    pub fn on_port(name: impl Into<String>, port: u16) -> Self {
        Self::new(name, Endpoint::localhost(port))
    }

    /// Extension name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project into the collector's extension mapping
    pub fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert("endpoint".into(), self.endpoint.address().into());
        config
    }
}
