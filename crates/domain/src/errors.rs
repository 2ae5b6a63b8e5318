use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query has no questions")]
    MalformedQuery,

    #[error("Zone transfer refused for client {client}")]
    UnauthorizedTransfer { client: String },

    #[error("Zone transfers are not served over UDP")]
    TransportMismatch,

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Zone transfer aborted: {0}")]
    TransferAborted(String),

    #[error("Failed to write response to client: {0}")]
    ResponseWrite(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport error with {server}: {reason}")]
    TransportIo { server: String, reason: String },
}

impl DomainError {
    /// Maps an I/O failure against `server` onto the transport variants.
    pub fn from_io(server: impl Into<String>, err: &std::io::Error) -> Self {
        use std::io::ErrorKind;

        let server = server.into();
        match err.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => DomainError::TransportTimeout { server },
            ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused { server },
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::UnexpectedEof => {
                DomainError::TransportConnectionReset { server }
            }
            _ => DomainError::TransportIo {
                server,
                reason: err.to_string(),
            },
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::TransportIo { .. }
        )
    }
}
