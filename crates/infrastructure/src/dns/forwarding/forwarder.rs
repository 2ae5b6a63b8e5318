use super::zone_transfer::stream_transfer;
use crate::dns::transport::create_transport;
use async_trait::async_trait;
use ferrous_proxy_application::ports::{ResponseSink, UpstreamForwarder};
use ferrous_proxy_domain::{DomainError, IncomingQuery, TransportKind, UpstreamAddr};
use std::time::Duration;
use tracing::debug;

/// Relays raw query bytes to an upstream and hands back its raw answer.
pub struct DnsForwarder {
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl UpstreamForwarder for DnsForwarder {
    async fn exchange(
        &self,
        upstream: &UpstreamAddr,
        transport: TransportKind,
        query: &IncomingQuery,
    ) -> Result<Vec<u8>, DomainError> {
        let transport = create_transport(upstream, transport);
        let response = transport.send(&query.wire, self.timeout).await?;

        check_reply_id(query.id, &response.bytes)?;

        debug!(
            upstream = %upstream,
            protocol = transport.protocol_name(),
            response_len = response.bytes.len(),
            "Upstream answered"
        );

        Ok(response.bytes)
    }

    async fn transfer(
        &self,
        upstream: &UpstreamAddr,
        query: &IncomingQuery,
        sink: &mut dyn ResponseSink,
    ) -> Result<usize, DomainError> {
        stream_transfer(upstream, query, sink, self.timeout).await
    }
}

fn check_reply_id(query_id: u16, reply: &[u8]) -> Result<(), DomainError> {
    let reply_id = match reply {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        _ => {
            return Err(DomainError::InvalidDnsResponse(format!(
                "reply too short: {} bytes",
                reply.len()
            )))
        }
    };

    if reply_id != query_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "reply id {} does not match query id {}",
            reply_id, query_id
        )));
    }
    Ok(())
}
