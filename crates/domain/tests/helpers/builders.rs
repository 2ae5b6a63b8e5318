#![allow(dead_code)]
use ferrous_proxy_domain::{ClientIdentity, DnsQuestion, IncomingQuery, RecordType};
use std::net::SocketAddr;

pub struct QueryBuilder {
    id: u16,
    questions: Vec<DnsQuestion>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            questions: vec![],
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn question(mut self, name: &str, record_type: RecordType) -> Self {
        self.questions.push(DnsQuestion::new(name, record_type, 1));
        self
    }

    pub fn build(self) -> IncomingQuery {
        IncomingQuery::new(self.id, self.questions, Vec::<u8>::new())
    }
}

pub fn udp_client(addr: &str) -> ClientIdentity {
    ClientIdentity::udp(addr.parse::<SocketAddr>().unwrap())
}

pub fn tcp_client(addr: &str) -> ClientIdentity {
    ClientIdentity::tcp(addr.parse::<SocketAddr>().unwrap())
}
