#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_proxy_application::ports::ResponseSink;
use ferrous_proxy_domain::{DomainError, IncomingQuery};
use ferrous_proxy_infrastructure::dns::parse_query;
use hickory_proto::op::{Message, Query};
use hickory_proto::rr::rdata::{A, SOA};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;

pub fn zone() -> Name {
    Name::from_ascii("example.com.").unwrap()
}

pub fn soa_record(serial: u32) -> Record {
    let soa = SOA::new(
        Name::from_ascii("ns1.example.com.").unwrap(),
        Name::from_ascii("hostmaster.example.com.").unwrap(),
        serial,
        3600,
        600,
        86400,
        300,
    );
    Record::from_rdata(zone(), 300, RData::SOA(soa))
}

pub fn a_record(last_octet: u8) -> Record {
    Record::from_rdata(
        zone(),
        300,
        RData::A(A(Ipv4Addr::new(192, 0, 2, last_octet))),
    )
}

pub fn query_message(id: u16, name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message.set_id(id);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    message
}

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    query_message(id, name, record_type).to_vec().unwrap()
}

pub fn incoming(id: u16, name: &str, record_type: RecordType) -> IncomingQuery {
    parse_query(&query_bytes(id, name, record_type)).unwrap().query
}

/// IXFR query carrying the client's current SOA in the authority section.
pub fn ixfr_incoming(id: u16, client_serial: u32) -> IncomingQuery {
    let mut message = query_message(id, "example.com.", RecordType::IXFR);
    message.add_name_server(soa_record(client_serial));
    parse_query(&message.to_vec().unwrap()).unwrap().query
}

pub fn decode(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<Vec<u8>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decoded(&self) -> Vec<Message> {
        self.messages.iter().map(|m| decode(m)).collect()
    }
}

#[async_trait]
impl ResponseSink for RecordingSink {
    async fn send(&mut self, message: &[u8]) -> Result<(), DomainError> {
        self.messages.push(message.to_vec());
        Ok(())
    }
}
