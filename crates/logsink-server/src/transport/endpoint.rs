//! Ingress endpoint: `scheme://host:port`.

use std::fmt;
use std::str::FromStr;

use logsink_core::error::{LogSinkError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Newline-delimited messages over any number of connections.
    Tcp,
    /// One datagram per message.
    Udp,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Tcp => "tcp",
            Scheme::Udp => "udp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: Scheme,
    /// Host as written; `*` means all interfaces.
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Same endpoint on a different port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `host:port` form accepted by the socket `bind` calls.
    pub fn authority(&self) -> String {
        let host = if self.host == "*" { "0.0.0.0" } else { self.host.as_str() };
        format!("{host}:{}", self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme.as_str(), self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = LogSinkError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| LogSinkError::Endpoint {
            endpoint: s.to_string(),
            reason: reason.to_string(),
        };

        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| invalid("expected scheme://host:port"))?;
        let scheme = match scheme.to_ascii_lowercase().as_str() {
            "tcp" => Scheme::Tcp,
            "udp" => Scheme::Udp,
            _ => return Err(invalid("scheme must be tcp or udp")),
        };

        // rsplit keeps bracketed IPv6 hosts intact: [::1]:5555
        let (host, port) = rest
            .rsplit_once(':')
            .ok_or_else(|| invalid("missing port"))?;
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| invalid("port must be a number between 0 and 65535"))?;

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
        })
    }
}
