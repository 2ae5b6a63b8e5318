use crate::dns::transport::send_with_length_prefix;
use async_trait::async_trait;
use ferrous_proxy_application::ports::ResponseSink;
use ferrous_proxy_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::net::UdpSocket;

/// Answers a datagram client through the shared listening socket.
pub struct UdpResponseSink {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
}

impl UdpResponseSink {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr) -> Self {
        Self { socket, peer }
    }
}

#[async_trait]
impl ResponseSink for UdpResponseSink {
    async fn send(&mut self, message: &[u8]) -> Result<(), DomainError> {
        self.socket
            .send_to(message, self.peer)
            .await
            .map_err(|e| DomainError::ResponseWrite(format!("{}: {}", self.peer, e)))?;
        Ok(())
    }
}

/// Writes length prefixed messages to the write half of a client stream.
pub struct TcpResponseSink<W> {
    writer: W,
}

impl<W> TcpResponseSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W> ResponseSink for TcpResponseSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, message: &[u8]) -> Result<(), DomainError> {
        send_with_length_prefix(&mut self.writer, message)
            .await
            .map_err(|e| DomainError::ResponseWrite(e.to_string()))
    }
}
