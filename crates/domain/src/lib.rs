//! Ferrous Proxy Domain Layer
pub mod client;
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod forward_strategy;
pub mod resolver_pool;
pub mod routing;
pub mod transfer_acl;

pub use client::ClientIdentity;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_protocol::{TransportKind, UpstreamAddr};
pub use dns_query::{DnsQuestion, IncomingQuery, QueryKind};
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use forward_strategy::ForwardStrategy;
pub use resolver_pool::{PublicResolverPool, PUBLIC_RESOLVERS};
pub use routing::{Route, RoutingTable};
pub use transfer_acl::TransferAllowList;
