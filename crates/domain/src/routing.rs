use crate::dns_protocol::UpstreamAddr;
use crate::errors::DomainError;
use std::sync::Arc;

/// One suffix route: names under `suffix` go to `upstream`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    suffix: Arc<str>,
    upstream: UpstreamAddr,
}

impl Route {
    /// Normalizes the suffix to lower case with a trailing dot.
    pub fn new(suffix: &str, upstream: UpstreamAddr) -> Result<Self, DomainError> {
        let suffix = normalize_suffix(suffix)?;
        Ok(Self {
            suffix: suffix.into(),
            upstream,
        })
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn upstream(&self) -> &UpstreamAddr {
        &self.upstream
    }

    /// Label-aligned suffix match against a lower-cased, fully qualified
    /// name. A suffix that already starts with a dot only matches names
    /// strictly below it.
    pub fn matches(&self, name: &str) -> bool {
        let suffix = self.suffix();
        if suffix == "." {
            return true;
        }
        if suffix.starts_with('.') {
            return name.ends_with(suffix);
        }
        match name.strip_suffix(suffix) {
            Some("") => true,
            Some(rest) => rest.ends_with('.'),
            None => false,
        }
    }
}

fn normalize_suffix(suffix: &str) -> Result<String, DomainError> {
    let suffix = suffix.trim();
    if suffix.is_empty() {
        return Err(DomainError::InvalidRoute("empty domain suffix".to_string()));
    }
    if suffix.contains(char::is_whitespace) {
        return Err(DomainError::InvalidRoute(format!(
            "domain suffix '{}' contains whitespace",
            suffix
        )));
    }

    let mut normalized = suffix.to_ascii_lowercase();
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    Ok(normalized)
}

/// Lower-cases `name` and makes it fully qualified.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = name.to_ascii_lowercase();
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    normalized
}

/// Suffix → upstream table, built once at startup and shared read-only.
///
/// Routes are kept longest suffix first so overlapping entries resolve
/// to the most specific one.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    /// Later duplicates of the same suffix replace earlier ones.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut table: Vec<Route> = Vec::new();
        for route in routes {
            match table.iter_mut().find(|r| r.suffix == route.suffix) {
                Some(existing) => *existing = route,
                None => table.push(route),
            }
        }

        table.sort_by(|a, b| {
            b.suffix
                .len()
                .cmp(&a.suffix.len())
                .then_with(|| a.suffix.cmp(&b.suffix))
        });

        Self { routes: table }
    }

    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, DomainError> {
        let routes = pairs
            .into_iter()
            .map(|(suffix, upstream)| Route::new(suffix, upstream.parse()?))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(routes))
    }

    pub fn lookup(&self, name: &str) -> Option<&Route> {
        let name = normalize_name(name);
        self.routes.iter().find(|route| route.matches(&name))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
