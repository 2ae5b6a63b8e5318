use crate::errors::DomainError;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

/// Upstream server address that may or may not be resolved to an IP.
///
/// IP literals are parsed eagerly; hostnames are kept as-is and resolved
/// by the transport when it connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    let (host, port_str) = if s.starts_with('[') {
        let end = s.find(']')?;
        let rest = &s[end + 1..];
        (&s[1..end], rest.strip_prefix(':')?)
    } else {
        s.rsplit_once(':')?
    };

    if host.is_empty() || port_str.is_empty() || (host.contains(':') && !s.starts_with('[')) {
        return None;
    }

    let port = port_str.parse::<u16>().ok()?;
    Some((host, port))
}

impl FromStr for UpstreamAddr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(UpstreamAddr::Resolved(addr));
        }
        match parse_host_port(s) {
            Some((host, port)) => Ok(UpstreamAddr::Unresolved {
                hostname: host.into(),
                port,
            }),
            None => Err(DomainError::InvalidUpstream(format!(
                "'{}' must be host:port",
                s
            ))),
        }
    }
}

/// Transport a query arrived on. Upstream exchanges reuse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Udp,
    Tcp,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Udp => "UDP",
            TransportKind::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
