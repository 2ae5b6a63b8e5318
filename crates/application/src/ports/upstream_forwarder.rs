use super::ResponseSink;
use async_trait::async_trait;
use ferrous_proxy_domain::{DomainError, IncomingQuery, TransportKind, UpstreamAddr};

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// One query, one reply, over `transport`. Returns the reply bytes
    /// exactly as the upstream sent them.
    async fn exchange(
        &self,
        upstream: &UpstreamAddr,
        transport: TransportKind,
        query: &IncomingQuery,
    ) -> Result<Vec<u8>, DomainError>;

    /// Streams a zone transfer from `upstream` into `sink`, one message at a
    /// time and in upstream order. Returns the number of messages relayed.
    async fn transfer(
        &self,
        upstream: &UpstreamAddr,
        query: &IncomingQuery,
        sink: &mut dyn ResponseSink,
    ) -> Result<usize, DomainError>;
}
