//! Network endpoint value type

use std::fmt;

/// Hosts treated as loopback by [`Endpoint::is_loopback`]
const LOOPBACK_HOSTS: &[&str] = &["127.0.0.1", "localhost", "::1"];

/// Default bind host for receivers and extensions
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default OTLP gRPC port
pub const DEFAULT_GRPC_PORT: u16 = 4317;

/// Default OTLP HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 4318;

/// A `host:port` pair a component listens on
///
/// No validation happens at construction; the pair is emitted as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Host name or IP literal
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::localhost(DEFAULT_GRPC_PORT)
    }
}

impl Endpoint {
    /// Create an endpoint from a host and port
    #[inline]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Create an endpoint on the default loopback host
    #[inline]
    pub fn localhost(port: u16) -> Self {
        Self::new(DEFAULT_HOST, port)
    }

    /// Render as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check whether the host is a loopback address
    ///
    /// This is a fixed membership test against `127.0.0.1`, `localhost` and
    /// `::1`. Other loopback spellings (`127.0.0.2`, `[::1]`) are not
    /// recognised and no name resolution takes place.
    #[inline]
    pub fn is_loopback(&self) -> bool {
        LOOPBACK_HOSTS.contains(&self.host.as_str())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.address(), "127.0.0.1:4317");
    }

    #[test]
    fn test_address_and_display_agree() {
        let endpoint = Endpoint::new("collector.internal", 9464);
        assert_eq!(endpoint.address(), "collector.internal:9464");
        assert_eq!(endpoint.to_string(), endpoint.address());
    }

    #[test]
    fn test_loopback_hosts() {
        for host in ["127.0.0.1", "localhost", "::1"] {
            assert!(Endpoint::new(host, 4317).is_loopback(), "{host}");
        }
    }

    #[test]
    fn test_non_loopback_hosts() {
        for host in ["0.0.0.0", "10.0.0.5", "collector", "LOCALHOST", "127.0.0.2"] {
            assert!(!Endpoint::new(host, 4317).is_loopback(), "{host}");
        }
    }
}
