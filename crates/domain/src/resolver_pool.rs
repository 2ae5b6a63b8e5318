use crate::dns_protocol::UpstreamAddr;
use crate::errors::DomainError;

/// Public resolvers used when no route matches a query.
pub const PUBLIC_RESOLVERS: &[&str] = &[
    "1.1.1.1:53",
    "8.8.8.8:53",
    "8.8.4.4:53",
    "209.244.0.3:53",
    "209.244.0.4:53",
    "64.6.64.6:53",
    "64.6.65.6:53",
    "9.9.9.9:53",
    "149.112.112.112:53",
    "84.200.69.80:53",
    "84.200.70.40:53",
    "8.26.56.26:53",
    "8.20.247.20:53",
    "208.67.222.222:53",
    "208.67.220.220:53",
    "199.85.126.10:53",
    "199.85.127.10:53",
    "81.218.119.11:53",
    "209.88.198.133:53",
    "195.46.39.39:53",
    "195.46.39.40:53",
    "69.195.152.204:53",
    "23.94.60.240:53",
    "208.76.50.50:53",
    "208.76.51.51:53",
    "216.146.35.35:53",
    "216.146.36.36:53",
    "37.235.1.174:53",
    "37.235.1.177:53",
    "198.101.242.72:53",
    "23.253.163.53:53",
    "77.88.8.8:53",
    "77.88.8.1:53",
    "91.239.100.100:53",
];

/// Fallback upstreams, picked uniformly at random per query.
#[derive(Debug, Clone)]
pub struct PublicResolverPool {
    servers: Vec<UpstreamAddr>,
}

impl PublicResolverPool {
    pub fn builtin() -> Self {
        let servers = PUBLIC_RESOLVERS
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        Self { servers }
    }

    /// An empty list is rejected: the selector must always have a pick.
    pub fn from_servers<I, S>(servers: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let servers = servers
            .into_iter()
            .map(|s| s.as_ref().parse::<UpstreamAddr>())
            .collect::<Result<Vec<_>, _>>()?;

        if servers.is_empty() {
            return Err(DomainError::InvalidUpstream(
                "resolver pool cannot be empty".to_string(),
            ));
        }
        Ok(Self { servers })
    }

    pub fn pick(&self) -> &UpstreamAddr {
        &self.servers[fastrand::usize(..self.servers.len())]
    }

    pub fn pick_with(&self, rng: &mut fastrand::Rng) -> &UpstreamAddr {
        &self.servers[rng.usize(..self.servers.len())]
    }

    pub fn contains(&self, addr: &UpstreamAddr) -> bool {
        self.servers.contains(addr)
    }

    pub fn servers(&self) -> &[UpstreamAddr] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl Default for PublicResolverPool {
    fn default() -> Self {
        Self::builtin()
    }
}
