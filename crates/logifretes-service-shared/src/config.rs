//! Service configuration.
//!
//! The only knob is the listen port:
//!
//! - `PORT`: HTTP port (default: 8080)
//!
//! Logging and metrics read their own variables, see [`crate::logging`] and
//! [`crate::metrics`].

use std::net::SocketAddr;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok().as_deref()),
        }
    }

    /// Address to bind on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Parse a `PORT` value, falling back to [`DEFAULT_PORT`].
///
/// Unset or empty values fall back silently; unparsable values log a warning.
pub fn parse_port(value: Option<&str>) -> u16 {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => DEFAULT_PORT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = raw, default = DEFAULT_PORT, "invalid PORT, using default");
            DEFAULT_PORT
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None), 8080);
        assert_eq!(parse_port(Some("")), 8080);
        assert_eq!(parse_port(Some("3000")), 3000);
        assert_eq!(parse_port(Some(" 9090 ")), 9090);
        assert_eq!(parse_port(Some("http")), 8080);
        assert_eq!(parse_port(Some("70000")), 8080);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServiceConfig { port: 3000 };
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(ServiceConfig::default().port, DEFAULT_PORT);
    }
}
