//! TLS settings shared by receivers and exporters

use serde_yaml::{Mapping, Value};

/// TLS block for a receiver protocol or an exporter
///
/// Components only emit the block when `enabled` is set; `insecure` is
/// always part of the emitted block, the file paths only when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Whether TLS is configured at all
    /// Default: true
    pub enabled: bool,

    /// Skip certificate verification
    /// Default: false
    pub insecure: bool,

    /// Certificate file path
    pub cert_file: Option<String>,

    /// Private key file path
    pub key_file: Option<String>,

    /// CA bundle file path
    pub ca_file: Option<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            insecure: false,
            cert_file: None,
            key_file: None,
            ca_file: None,
        }
    }
}

impl TlsConfig {
    /// TLS turned off entirely
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// TLS enabled without certificate verification
    #[must_use]
    pub fn insecure() -> Self {
        Self {
            insecure: true,
            ..Self::default()
        }
    }

    /// Set the certificate file
    #[must_use]
    pub fn with_cert_file(mut self, path: impl Into<String>) -> Self {
        self.cert_file = Some(path.into());
        self
    }

    /// Set the private key file
    #[must_use]
    pub fn with_key_file(mut self, path: impl Into<String>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    /// Set the CA bundle file
    #[must_use]
    pub fn with_ca_file(mut self, path: impl Into<String>) -> Self {
        self.ca_file = Some(path.into());
        self
    }

    /// Enabled and verifying certificates
    #[inline]
    pub fn is_secure(&self) -> bool {
        self.enabled && !self.insecure
    }

    /// Project into the collector's `tls` mapping
    pub fn to_config(&self) -> Mapping {
        let mut config = Mapping::new();
        config.insert("insecure".into(), self.insecure.into());

        let files = [
            ("cert_file", &self.cert_file),
            ("key_file", &self.key_file),
            ("ca_file", &self.ca_file),
        ];
        for (key, path) in files {
            if let Some(path) = path.as_deref().filter(|p| !p.is_empty()) {
                config.insert(key.into(), Value::from(path));
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_secure() {
        let tls = TlsConfig::default();
        assert!(tls.enabled);
        assert!(!tls.insecure);
        assert!(tls.is_secure());
    }

    #[test]
    fn test_minimal_projection_only_has_insecure() {
        let config = TlsConfig::default().to_config();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("insecure"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_projection_includes_set_paths_only() {
        let config = TlsConfig::default()
            .with_cert_file("/certs/server.crt")
            .with_ca_file("/certs/ca.crt")
            .to_config();

        assert!(config.contains_key("insecure"));
        assert_eq!(
            config.get("cert_file").and_then(Value::as_str),
            Some("/certs/server.crt")
        );
        assert!(!config.contains_key("key_file"));
        assert_eq!(
            config.get("ca_file").and_then(Value::as_str),
            Some("/certs/ca.crt")
        );
    }

    #[test]
    fn test_projection_key_order() {
        let config = TlsConfig::insecure()
            .with_ca_file("ca")
            .with_key_file("key")
            .with_cert_file("cert")
            .to_config();

        let keys: Vec<_> = config.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["insecure", "cert_file", "key_file", "ca_file"]);
    }

    #[test]
    fn test_disabled_and_insecure_are_not_secure() {
        assert!(!TlsConfig::disabled().is_secure());
        assert!(!TlsConfig::insecure().is_secure());
    }
}
