//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Replies carrying a different
//! transaction id are skipped; they can be late answers to an earlier
//! query that timed out.

use super::resolver::resolve_upstream;
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_proxy_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::debug;

/// Largest datagram we accept from an upstream
const MAX_UDP_RESPONSE_SIZE: usize = 65_535;

/// DNS over UDP transport
pub struct UdpTransport {
    upstream: UpstreamAddr,
}

impl UdpTransport {
    pub fn new(upstream: UpstreamAddr) -> Self {
        Self { upstream }
    }

    async fn bind_for(server_addr: SocketAddr) -> std::io::Result<UdpSocket> {
        let bind_addr = if server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(server_addr).await?;
        Ok(socket)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = resolve_upstream(&self.upstream, timeout).await?;
        let server = server_addr.to_string();
        let io_err = |e: std::io::Error| DomainError::from_io(server.as_str(), &e);

        let socket = Self::bind_for(server_addr).await.map_err(io_err)?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.clone(),
            })?
            .map_err(io_err)?;

        debug!(server = %server_addr, bytes_sent = bytes_sent, "UDP query sent");

        let query_id = message_id(message_bytes);
        let deadline = Instant::now() + timeout;
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let bytes_received = tokio::time::timeout_at(deadline, socket.recv(&mut recv_buf))
                .await
                .map_err(|_| DomainError::TransportTimeout {
                    server: server.clone(),
                })?
                .map_err(io_err)?;

            if query_id.is_some() && message_id(&recv_buf[..bytes_received]) != query_id {
                debug!(server = %server_addr, "Skipping UDP reply with mismatched id");
                continue;
            }

            recv_buf.truncate(bytes_received);

            debug!(
                server = %server_addr,
                bytes_received = bytes_received,
                "UDP response received"
            );

            return Ok(TransportResponse { bytes: recv_buf });
        }
    }
}

fn message_id(message: &[u8]) -> Option<u16> {
    match message {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}
