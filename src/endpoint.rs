//! Database endpoint the poller waits on.

use std::fmt;

use crate::error::EndpointError;

/// Port probed when none is configured.
pub const DEFAULT_PORT: u16 = 3306;

/// A validated `(host, port)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint, rejecting a blank host or port 0.
    ///
    /// A bracketed IPv6 literal such as `[::1]` is unwrapped. Otherwise the
    /// host is kept as given; resolution happens on every connect attempt so
    /// DNS records that appear late are picked up.
    pub fn try_new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let mut host = host.into();
        if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            host = inner.to_owned();
        }
        if host.trim().is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        if port == 0 {
            return Err(EndpointError::InvalidPort);
        }
        Ok(Self { host, port })
    }

    /// Endpoint on the default database port.
    pub fn database(host: impl Into<String>) -> Result<Self, EndpointError> {
        Self::try_new(host, DEFAULT_PORT)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
