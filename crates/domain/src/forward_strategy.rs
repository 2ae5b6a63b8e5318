use crate::dns_protocol::TransportKind;
use crate::dns_query::QueryKind;
use crate::errors::DomainError;

/// How a query is carried to its upstream, per query kind and inbound
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardStrategy {
    UdpExchange,
    TcpExchange,
    TcpTransfer,
}

impl ForwardStrategy {
    pub fn resolve(kind: QueryKind, transport: TransportKind) -> Result<Self, DomainError> {
        match (kind, transport) {
            (QueryKind::Standard, TransportKind::Udp) => Ok(ForwardStrategy::UdpExchange),
            (QueryKind::Standard, TransportKind::Tcp) => Ok(ForwardStrategy::TcpExchange),
            (QueryKind::ZoneTransfer, TransportKind::Tcp) => Ok(ForwardStrategy::TcpTransfer),
            (QueryKind::ZoneTransfer, TransportKind::Udp) => Err(DomainError::TransportMismatch),
        }
    }

    pub fn transport(&self) -> TransportKind {
        match self {
            ForwardStrategy::UdpExchange => TransportKind::Udp,
            ForwardStrategy::TcpExchange | ForwardStrategy::TcpTransfer => TransportKind::Tcp,
        }
    }
}
