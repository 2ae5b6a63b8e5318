use crate::dns_protocol::TransportKind;
use std::net::{IpAddr, SocketAddr};

/// Who sent a query and over which transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIdentity {
    pub addr: SocketAddr,
    pub transport: TransportKind,
}

impl ClientIdentity {
    pub fn new(addr: SocketAddr, transport: TransportKind) -> Self {
        Self { addr, transport }
    }

    pub fn udp(addr: SocketAddr) -> Self {
        Self::new(addr, TransportKind::Udp)
    }

    pub fn tcp(addr: SocketAddr) -> Self {
        Self::new(addr, TransportKind::Tcp)
    }

    /// Source IP with the port stripped. Dual-stack listeners report IPv4
    /// peers as `::ffff:a.b.c.d`; those are folded back to plain IPv4.
    pub fn ip(&self) -> IpAddr {
        self.addr.ip().to_canonical()
    }

    pub fn host(&self) -> String {
        self.ip().to_string()
    }
}
