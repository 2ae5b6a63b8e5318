//! Inbound zone transfer relay (RFC 5936 AXFR, RFC 1995 IXFR)
//!
//! Upstream messages are relayed verbatim, one sink write per message, until
//! the [`TransferTracker`] sees the closing SOA.

use crate::dns::transport::{read_with_length_prefix, send_with_length_prefix, TcpTransport};
use ferrous_proxy_application::ports::ResponseSink;
use ferrous_proxy_domain::{DomainError, IncomingQuery, RecordType, UpstreamAddr};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferProgress {
    Pending,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferKind {
    Axfr,
    Ixfr,
}

/// Decides when a transfer stream is finished.
///
/// AXFR is done with the first message whose last answer is an SOA, except
/// for a first message holding only the opening SOA. IXFR is done on a
/// lone SOA in the first message, when the client's serial is already
/// current, or when the opening serial shows up again: twice for a stream
/// that turns out to be a full zone, three times for a real increment.
#[derive(Debug)]
pub struct TransferTracker {
    kind: TransferKind,
    query_id: u16,
    client_serial: Option<u32>,
    started: bool,
    serial: u32,
    full_zone: bool,
    serial_hits: u8,
}

impl TransferTracker {
    pub fn axfr(query_id: u16) -> Self {
        Self::new(TransferKind::Axfr, query_id, None)
    }

    pub fn ixfr(query_id: u16, client_serial: Option<u32>) -> Self {
        Self::new(TransferKind::Ixfr, query_id, client_serial)
    }

    fn new(kind: TransferKind, query_id: u16, client_serial: Option<u32>) -> Self {
        Self {
            kind,
            query_id,
            client_serial,
            started: false,
            serial: 0,
            full_zone: true,
            serial_hits: 0,
        }
    }

    /// Picks the tracker for a transfer query. IXFR wins when both types
    /// are asked for; its starting serial comes from the authority section.
    pub fn for_query(query: &IncomingQuery) -> Result<Self, DomainError> {
        match query.transfer_type() {
            Some(RecordType::IXFR) => {
                let client_serial = Message::from_vec(&query.wire)
                    .ok()
                    .and_then(|m| m.name_servers().iter().find_map(soa_serial));
                Ok(Self::ixfr(query.id, client_serial))
            }
            Some(_) => Ok(Self::axfr(query.id)),
            None => Err(DomainError::MalformedQuery),
        }
    }

    pub fn observe(&mut self, message: &Message) -> Result<TransferProgress, DomainError> {
        if message.id() != self.query_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "transfer message id {} does not match query id {}",
                message.id(),
                self.query_id
            )));
        }

        if message.response_code() != ResponseCode::NoError {
            return Err(DomainError::TransferAborted(format!(
                "upstream answered {:?}",
                message.response_code()
            )));
        }

        match self.kind {
            TransferKind::Axfr => self.observe_axfr(message.answers()),
            TransferKind::Ixfr => self.observe_ixfr(message.answers()),
        }
    }

    fn observe_axfr(&mut self, answers: &[Record]) -> Result<TransferProgress, DomainError> {
        if !self.started {
            opening_serial(answers)?;
            self.started = true;
            if answers.len() == 1 {
                return Ok(TransferProgress::Pending);
            }
        }

        match answers.last().and_then(soa_serial) {
            Some(_) => Ok(TransferProgress::Complete),
            None => Ok(TransferProgress::Pending),
        }
    }

    fn observe_ixfr(&mut self, answers: &[Record]) -> Result<TransferProgress, DomainError> {
        if answers.is_empty() {
            return Ok(TransferProgress::Pending);
        }

        if !self.started {
            self.serial = opening_serial(answers)?;
            if self.client_serial.is_none() && answers.len() == 1 {
                return Ok(TransferProgress::Complete);
            }
            if self.client_serial.is_some_and(|client| client >= self.serial) {
                return Ok(TransferProgress::Complete);
            }
            self.started = true;
        }

        for serial in answers.iter().filter_map(soa_serial) {
            if serial == self.serial {
                self.serial_hits += 1;
                if (self.full_zone && self.serial_hits == 2) || self.serial_hits == 3 {
                    return Ok(TransferProgress::Complete);
                }
            } else if self.full_zone {
                self.full_zone = false;
            }
        }

        Ok(TransferProgress::Pending)
    }
}

fn soa_serial(record: &Record) -> Option<u32> {
    match record.data() {
        Some(RData::SOA(soa)) => Some(soa.serial()),
        _ => None,
    }
}

fn opening_serial(answers: &[Record]) -> Result<u32, DomainError> {
    answers.first().and_then(soa_serial).ok_or_else(|| {
        DomainError::InvalidDnsResponse("transfer does not start with an SOA record".to_string())
    })
}

/// Opens a TCP session to `upstream`, sends the transfer query and relays
/// every answer message to `sink` until the transfer completes.
///
/// Returns the number of messages relayed. Any failure aborts the whole
/// transfer; messages already relayed stay relayed.
pub async fn stream_transfer(
    upstream: &UpstreamAddr,
    query: &IncomingQuery,
    sink: &mut dyn ResponseSink,
    timeout: Duration,
) -> Result<usize, DomainError> {
    let mut tracker = TransferTracker::for_query(query)?;
    let server = upstream.to_string();

    let mut stream = TcpTransport::new(upstream.clone()).connect(timeout).await?;

    tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, &query.wire))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.clone(),
        })?
        .map_err(|e| DomainError::from_io(server.as_str(), &e))?;

    debug!(upstream = %server, "Zone transfer requested");

    let mut relayed = 0usize;
    loop {
        let bytes = match tokio::time::timeout(timeout, read_with_length_prefix(&mut stream)).await
        {
            Err(_) => {
                return Err(DomainError::TransportTimeout { server });
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(DomainError::TransferAborted(format!(
                    "{} closed the connection after {} messages",
                    server, relayed
                )));
            }
            Ok(Err(e)) => return Err(DomainError::from_io(server.as_str(), &e)),
            Ok(Ok(bytes)) => bytes,
        };

        let message = Message::from_vec(&bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("failed to parse transfer message: {}", e))
        })?;

        let progress = tracker.observe(&message)?;

        sink.send(&bytes).await?;
        relayed += 1;

        if progress == TransferProgress::Complete {
            info!(upstream = %server, messages = relayed, "Zone transfer relayed");
            return Ok(relayed);
        }
    }
}
