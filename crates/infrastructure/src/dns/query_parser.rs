use super::forwarding::RecordTypeMapper;
use ferrous_proxy_domain::{DnsQuestion, IncomingQuery};
use hickory_proto::error::ProtoError;
use hickory_proto::op::{Message, MessageType};
use thiserror::Error;

/// An inbound message decoded both ways: the hickory view needed to build a
/// failure response and the domain view the use case works on.
#[derive(Debug)]
pub struct ParsedQuery {
    pub message: Message,
    pub query: IncomingQuery,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed DNS message: {0}")]
    Malformed(#[source] ProtoError),

    /// QR bit set; nothing to answer.
    #[error("message is a response, not a query")]
    NotAQuery,
}

pub fn parse_query(raw: &[u8]) -> Result<ParsedQuery, ParseError> {
    let message = Message::from_vec(raw).map_err(ParseError::Malformed)?;

    if message.message_type() == MessageType::Response {
        return Err(ParseError::NotAQuery);
    }

    let questions = message
        .queries()
        .iter()
        .map(|q| {
            DnsQuestion::new(
                q.name().to_ascii(),
                RecordTypeMapper::from_hickory(q.query_type()),
                u16::from(q.query_class()),
            )
        })
        .collect();

    let query = IncomingQuery::new(message.id(), questions, raw.to_vec());
    Ok(ParsedQuery { message, query })
}
