//! Host addressing — `host:port` for one agent instance.
//!
//! A [`HostAddr`] is the opaque identifier every RPC call is parameterised
//! with. It carries no ownership semantics and is cheap to clone; the
//! discovery listener produces them and the caller passes one per call.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur when parsing a `host:port` string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddrError {
    #[error("missing ':' separator in host address: '{0}'")]
    MissingPort(String),

    #[error("empty host in address: '{0}'")]
    EmptyHost(String),

    #[error("invalid port in address: '{0}'")]
    InvalidPort(String),
}

/// The network location of one host agent: hostname or IP, plus port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAddr {
    /// Hostname or IP literal, no scheme, no path.
    pub host: String,
    /// The agent's HTTP port.
    pub port: u16,
}

impl HostAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// Formats as `host:port`, the form the URL encoder consumes.
impl fmt::Display for HostAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse a `host:port` string. Splits on the **last** `:` so IPv6-style
/// hosts with embedded colons keep their tail segment as the port.
impl FromStr for HostAddr {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colon = s
            .rfind(':')
            .ok_or_else(|| AddrError::MissingPort(s.to_string()))?;

        let host = s[..colon].trim();
        let port = s[colon + 1..].trim();

        if host.is_empty() {
            return Err(AddrError::EmptyHost(s.to_string()));
        }

        let port = port
            .parse::<u16>()
            .map_err(|_| AddrError::InvalidPort(s.to_string()))?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
