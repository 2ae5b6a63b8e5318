use ferrous_proxy_domain::{PublicResolverPool, RoutingTable, UpstreamAddr};
use std::sync::Arc;
use tracing::debug;

/// Destination chosen for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub addr: UpstreamAddr,
    /// Suffix of the route that matched, `None` for a pool pick.
    pub route: Option<Arc<str>>,
}

impl UpstreamTarget {
    pub fn is_routed(&self) -> bool {
        self.route.is_some()
    }
}

/// Route lookup with random fallback to the resolver pool.
#[derive(Debug, Clone)]
pub struct UpstreamSelector {
    routes: Arc<RoutingTable>,
    pool: Arc<PublicResolverPool>,
}

impl UpstreamSelector {
    pub fn new(routes: Arc<RoutingTable>, pool: Arc<PublicResolverPool>) -> Self {
        Self { routes, pool }
    }

    pub fn select(&self, name: &str) -> UpstreamTarget {
        self.routed(name)
            .unwrap_or_else(|| self.fallback(name, self.pool.pick().clone()))
    }

    /// Same as [`select`](Self::select) with a caller supplied random source.
    pub fn select_with(&self, name: &str, rng: &mut fastrand::Rng) -> UpstreamTarget {
        self.routed(name)
            .unwrap_or_else(|| self.fallback(name, self.pool.pick_with(rng).clone()))
    }

    fn routed(&self, name: &str) -> Option<UpstreamTarget> {
        let route = self.routes.lookup(name)?;
        debug!(domain = %name, suffix = %route.suffix(), upstream = %route.upstream(), "Route matched");
        Some(UpstreamTarget {
            addr: route.upstream().clone(),
            route: Some(route.suffix().into()),
        })
    }

    fn fallback(&self, name: &str, addr: UpstreamAddr) -> UpstreamTarget {
        debug!(domain = %name, upstream = %addr, "No route matched, using public resolver");
        UpstreamTarget { addr, route: None }
    }
}
