use ferrous_proxy_application::use_cases::{ProxyQueryUseCase, UpstreamSelector};
use ferrous_proxy_domain::Config;
use ferrous_proxy_infrastructure::dns::{DnsForwarder, DnsServerHandler};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ProxyServices {
    pub handler: Arc<DnsServerHandler>,
}

impl ProxyServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let routes = config.routing_table()?;
        let pool = config.resolver_pool()?;
        let allow_list = config.allow_list();

        for route in routes.routes() {
            info!(suffix = %route.suffix(), upstream = %route.upstream(), "Route configured");
        }
        info!(servers = pool.len(), "Fallback resolver pool ready");
        if allow_list.is_empty() {
            warn!("No clients allowed to transfer zones; AXFR/IXFR will be refused");
        }
        for entry in allow_list.unmatchable_entries() {
            warn!(entry = %entry, "Transfer allow-list entry is not an IP address and will never match");
        }

        let selector = UpstreamSelector::new(Arc::new(routes), Arc::new(pool));
        let forwarder = Arc::new(DnsForwarder::new(config.upstream_timeout()));
        let use_case = ProxyQueryUseCase::new(selector, Arc::new(allow_list), forwarder);

        Ok(Self {
            handler: Arc::new(DnsServerHandler::new(Arc::new(use_case))),
        })
    }
}
