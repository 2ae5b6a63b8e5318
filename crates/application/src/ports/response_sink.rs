use async_trait::async_trait;
use ferrous_proxy_domain::DomainError;

/// Where responses for one inbound query are written.
///
/// Each call carries one complete DNS message; transports add their own
/// framing.
#[async_trait]
pub trait ResponseSink: Send {
    async fn send(&mut self, message: &[u8]) -> Result<(), DomainError>;
}
