#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_proxy_application::ports::{ResponseSink, UpstreamForwarder};
use ferrous_proxy_domain::{
    ClientIdentity, DnsQuestion, DomainError, IncomingQuery, RecordType, TransportKind,
    UpstreamAddr,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardCall {
    Exchange {
        upstream: UpstreamAddr,
        transport: TransportKind,
    },
    Transfer {
        upstream: UpstreamAddr,
    },
}

#[derive(Clone, Default)]
pub struct MockUpstreamForwarder {
    calls: Arc<Mutex<Vec<ForwardCall>>>,
    reply: Arc<Mutex<Vec<u8>>>,
    transfer_messages: Arc<Mutex<Vec<Vec<u8>>>>,
    transfer_fail_after: Arc<Mutex<Option<usize>>>,
    error: Arc<Mutex<Option<DomainError>>>,
}

impl MockUpstreamForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, reply: &[u8]) {
        *self.reply.lock().unwrap() = reply.to_vec();
    }

    pub fn set_transfer_messages(&self, messages: Vec<Vec<u8>>) {
        *self.transfer_messages.lock().unwrap() = messages;
    }

    /// Relay `count` transfer messages, then fail.
    pub fn fail_transfer_after(&self, count: usize) {
        *self.transfer_fail_after.lock().unwrap() = Some(count);
    }

    pub fn set_error(&self, error: DomainError) {
        *self.error.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<ForwardCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn exchange(
        &self,
        upstream: &UpstreamAddr,
        transport: TransportKind,
        _query: &IncomingQuery,
    ) -> Result<Vec<u8>, DomainError> {
        self.calls.lock().unwrap().push(ForwardCall::Exchange {
            upstream: upstream.clone(),
            transport,
        });

        if let Some(err) = self.error.lock().unwrap().clone() {
            return Err(err);
        }
        let reply = self.reply.lock().unwrap().clone();
        Ok(reply)
    }

    async fn transfer(
        &self,
        upstream: &UpstreamAddr,
        _query: &IncomingQuery,
        sink: &mut dyn ResponseSink,
    ) -> Result<usize, DomainError> {
        self.calls.lock().unwrap().push(ForwardCall::Transfer {
            upstream: upstream.clone(),
        });

        if let Some(err) = self.error.lock().unwrap().clone() {
            return Err(err);
        }

        let messages = self.transfer_messages.lock().unwrap().clone();
        let fail_after = *self.transfer_fail_after.lock().unwrap();

        for (sent, message) in messages.iter().enumerate() {
            if fail_after == Some(sent) {
                return Err(DomainError::TransferAborted(
                    "upstream closed mid-transfer".to_string(),
                ));
            }
            sink.send(message).await?;
        }
        Ok(messages.len())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<Vec<u8>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            messages: vec![],
            fail: true,
        }
    }
}

#[async_trait]
impl ResponseSink for RecordingSink {
    async fn send(&mut self, message: &[u8]) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::ResponseWrite("client went away".to_string()));
        }
        self.messages.push(message.to_vec());
        Ok(())
    }
}

pub fn query(name: &str, record_type: RecordType) -> IncomingQuery {
    IncomingQuery::new(
        0x2a2a,
        vec![DnsQuestion::new(name, record_type, 1)],
        vec![0x2a_u8, 0x2a],
    )
}

pub fn empty_query() -> IncomingQuery {
    IncomingQuery::new(0x2a2a, vec![], vec![0x2a_u8, 0x2a])
}

pub fn udp_client(addr: &str) -> ClientIdentity {
    ClientIdentity::udp(addr.parse::<SocketAddr>().unwrap())
}

pub fn tcp_client(addr: &str) -> ClientIdentity {
    ClientIdentity::tcp(addr.parse::<SocketAddr>().unwrap())
}
