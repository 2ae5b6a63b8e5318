use crate::dns_record::RecordType;
use crate::errors::DomainError;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    /// Presentation form as received, including the trailing dot.
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: u16,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType, class: u16) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
        }
    }
}

/// A parsed inbound query together with the bytes it arrived as.
///
/// The wire form is what gets forwarded, so upstreams see exactly what the
/// client sent (id, flags and EDNS options included).
#[derive(Debug, Clone)]
pub struct IncomingQuery {
    pub id: u16,
    pub questions: Vec<DnsQuestion>,
    pub wire: Arc<[u8]>,
}

impl IncomingQuery {
    pub fn new(id: u16, questions: Vec<DnsQuestion>, wire: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id,
            questions,
            wire: wire.into(),
        }
    }

    pub fn first_question(&self) -> Option<&DnsQuestion> {
        self.questions.first()
    }

    pub fn is_transfer(&self) -> bool {
        self.questions
            .iter()
            .any(|q| q.record_type.is_zone_transfer())
    }

    /// IXFR wins over AXFR when both appear; the stream shape is
    /// decided by the upstream either way.
    pub fn transfer_type(&self) -> Option<RecordType> {
        if self
            .questions
            .iter()
            .any(|q| q.record_type == RecordType::IXFR)
        {
            Some(RecordType::IXFR)
        } else if self.is_transfer() {
            Some(RecordType::AXFR)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Standard,
    ZoneTransfer,
}

impl QueryKind {
    /// A query with no questions cannot be routed and is rejected.
    pub fn classify(query: &IncomingQuery) -> Result<Self, DomainError> {
        if query.questions.is_empty() {
            return Err(DomainError::MalformedQuery);
        }

        if query.is_transfer() {
            Ok(QueryKind::ZoneTransfer)
        } else {
            Ok(QueryKind::Standard)
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, QueryKind::ZoneTransfer)
    }
}
