use super::query_parser::parse_query;
use super::wire_response::build_servfail_response;
use ferrous_proxy_application::ports::ResponseSink;
use ferrous_proxy_application::use_cases::ProxyQueryUseCase;
use ferrous_proxy_domain::{ClientIdentity, DomainError};
use hickory_proto::op::Message;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What the handler did with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Upstream reply or transfer stream relayed.
    Answered { messages: usize },
    /// SERVFAIL written (or attempted) for the request.
    Failed,
    /// Unparseable or not a query; nothing written.
    Dropped,
}

pub struct DnsServerHandler {
    use_case: Arc<ProxyQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ProxyQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Handles one raw message from `client`, writing exactly one outcome
    /// to `sink`: the relayed answer, the transfer stream, or SERVFAIL.
    pub async fn handle(
        &self,
        raw: &[u8],
        client: ClientIdentity,
        sink: &mut dyn ResponseSink,
    ) -> HandleOutcome {
        let parsed = match parse_query(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(client = %client.addr, error = %e, "Dropping inbound message");
                return HandleOutcome::Dropped;
            }
        };

        match parsed.query.first_question() {
            Some(question) => info!(
                domain = %question.name,
                record_type = %question.record_type,
                client = %client.ip(),
                transport = %client.transport,
                "DNS query received"
            ),
            None => debug!(client = %client.ip(), "DNS query without questions"),
        }

        match self.use_case.execute(&parsed.query, &client, sink).await {
            Ok(outcome) => {
                debug!(
                    upstream = %outcome.target.addr,
                    messages = outcome.messages,
                    "Query answered"
                );
                HandleOutcome::Answered {
                    messages: outcome.messages,
                }
            }
            Err(e) => {
                log_failure(&e, &client);
                send_servfail(&parsed.message, sink).await;
                HandleOutcome::Failed
            }
        }
    }
}

fn log_failure(err: &DomainError, client: &ClientIdentity) {
    match err {
        // already reported by the use case
        DomainError::UnauthorizedTransfer { .. } => {}
        DomainError::MalformedQuery | DomainError::TransportMismatch => {
            debug!(client = %client.ip(), error = %err, "Query rejected")
        }
        e if e.is_transport() => warn!(client = %client.ip(), error = %e, "Upstream exchange failed"),
        e => error!(client = %client.ip(), error = %e, "Query resolution failed"),
    }
}

async fn send_servfail(request: &Message, sink: &mut dyn ResponseSink) {
    let response = match build_servfail_response(request) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to encode SERVFAIL response");
            return;
        }
    };

    debug!(id = request.id(), "Sending SERVFAIL");
    if let Err(e) = sink.send(&response).await {
        debug!(error = %e, "Failed to send SERVFAIL response");
    }
}
