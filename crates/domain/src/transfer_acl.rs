use crate::client::ClientIdentity;
use crate::dns_query::QueryKind;
use std::collections::HashSet;
use std::net::IpAddr;

/// Source addresses allowed to pull zone transfers through the proxy.
///
/// Upstreams only ever see the proxy's address, so this list is the sole
/// gate on who may copy a zone.
#[derive(Debug, Clone, Default)]
pub struct TransferAllowList {
    entries: HashSet<String>,
}

impl TransferAllowList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|entry| canonical_entry(entry.as_ref()))
            .collect();
        Self { entries }
    }

    /// Parses the comma separated `--allow-transfer` form.
    pub fn from_csv(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn contains(&self, host: &str) -> bool {
        self.entries.contains(host)
    }

    /// Ordinary lookups need no authorization.
    pub fn is_allowed(&self, client: &ClientIdentity, kind: QueryKind) -> bool {
        if !kind.is_transfer() {
            return true;
        }
        self.contains(&client.host())
    }

    /// Entries that are not IP literals. Client hosts are always plain IPs,
    /// so these never match.
    pub fn unmatchable_entries(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|entry| entry.parse::<IpAddr>().is_err())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical_entry(entry: &str) -> Option<String> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }
    match entry.parse::<IpAddr>() {
        Ok(ip) => Some(ip.to_canonical().to_string()),
        Err(_) => Some(entry.to_string()),
    }
}
