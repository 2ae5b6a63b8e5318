use ferrous_proxy_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Turns an upstream into a connectable address, resolving hostnames
/// through the system resolver. The first address returned wins.
pub async fn resolve_upstream(
    upstream: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    let (hostname, port) = match upstream {
        UpstreamAddr::Resolved(addr) => return Ok(*addr),
        UpstreamAddr::Unresolved { hostname, port } => (hostname, *port),
    };

    let target = format!("{}:{}", hostname, port);

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::TransportIo {
            server: target.clone(),
            reason: format!("resolution failed: {}", e),
        })?;

    addrs.next().ok_or_else(|| DomainError::TransportIo {
        server: target.clone(),
        reason: "no addresses found".to_string(),
    })
}
