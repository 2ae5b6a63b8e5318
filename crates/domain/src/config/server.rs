use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address for both the UDP and TCP listeners. `:53` means every
    /// interface, IPv4 and IPv6.
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_tcp_idle_timeout")]
    pub tcp_idle_timeout_secs: u64,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = self.address.trim();
        let address = if address.starts_with(':') {
            format!("[::]{}", address)
        } else {
            address.to_string()
        };

        address.parse().map_err(|_| {
            ConfigError::Validation(format!("Invalid listen address '{}'", self.address))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            tcp_idle_timeout_secs: default_tcp_idle_timeout(),
        }
    }
}

fn default_address() -> String {
    "[::]:53".to_string()
}

fn default_tcp_idle_timeout() -> u64 {
    10
}
