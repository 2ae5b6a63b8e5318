use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Bound on each connect, read and write with an upstream.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Replaces the built-in public resolver pool when non-empty.
    #[serde(default)]
    pub default_servers: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            default_servers: vec![],
        }
    }
}

fn default_timeout_ms() -> u64 {
    2000
}
