use super::select_upstream::{UpstreamSelector, UpstreamTarget};
use crate::ports::{ResponseSink, UpstreamForwarder};
use ferrous_proxy_domain::{
    ClientIdentity, DomainError, ForwardStrategy, IncomingQuery, QueryKind, TransferAllowList,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// What happened to a query that was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOutcome {
    pub target: UpstreamTarget,
    pub strategy: ForwardStrategy,
    /// Messages written to the client: 1 for a lookup, the stream length
    /// for a transfer.
    pub messages: usize,
}

/// Classify, authorize, select and forward one inbound query.
///
/// Every error returned here means nothing useful was written for the
/// query (or, for transfers, the stream was cut short) and the caller must
/// answer with a failure response.
pub struct ProxyQueryUseCase {
    selector: UpstreamSelector,
    allow_list: Arc<TransferAllowList>,
    forwarder: Arc<dyn UpstreamForwarder>,
}

impl ProxyQueryUseCase {
    pub fn new(
        selector: UpstreamSelector,
        allow_list: Arc<TransferAllowList>,
        forwarder: Arc<dyn UpstreamForwarder>,
    ) -> Self {
        Self {
            selector,
            allow_list,
            forwarder,
        }
    }

    pub async fn execute(
        &self,
        query: &IncomingQuery,
        client: &ClientIdentity,
        sink: &mut dyn ResponseSink,
    ) -> Result<ProxyOutcome, DomainError> {
        let kind = QueryKind::classify(query)?;

        if !self.allow_list.is_allowed(client, kind) {
            warn!(client = %client.host(), "Zone transfer refused: client not in allow-list");
            return Err(DomainError::UnauthorizedTransfer {
                client: client.host(),
            });
        }

        let strategy = ForwardStrategy::resolve(kind, client.transport)?;

        let question = query
            .first_question()
            .ok_or(DomainError::MalformedQuery)?;
        let target = self.selector.select(&question.name);

        debug!(
            domain = %question.name,
            record_type = %question.record_type,
            upstream = %target.addr,
            strategy = ?strategy,
            "Forwarding query"
        );

        let messages = match strategy {
            ForwardStrategy::UdpExchange | ForwardStrategy::TcpExchange => {
                let reply = self
                    .forwarder
                    .exchange(&target.addr, strategy.transport(), query)
                    .await?;
                sink.send(&reply).await?;
                1
            }
            ForwardStrategy::TcpTransfer => {
                self.forwarder.transfer(&target.addr, query, sink).await?
            }
        };

        Ok(ProxyOutcome {
            target,
            strategy,
            messages,
        })
    }
}
