pub mod resolver;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_proxy_domain::{DomainError, TransportKind, UpstreamAddr};
use std::time::Duration;

pub use resolver::resolve_upstream;
pub use tcp::{read_with_length_prefix, send_with_length_prefix, TcpTransport};
pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

/// Upstream exchanges always reuse the transport the query arrived on.
pub fn create_transport(upstream: &UpstreamAddr, kind: TransportKind) -> Transport {
    match kind {
        TransportKind::Udp => Transport::Udp(udp::UdpTransport::new(upstream.clone())),
        TransportKind::Tcp => Transport::Tcp(tcp::TcpTransport::new(upstream.clone())),
    }
}
