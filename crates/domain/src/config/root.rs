use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::routes::{parse_route_list, RouteConfig};
use super::server::ServerConfig;
use super::transfer::TransferConfig;
use super::upstream::UpstreamConfig;
use crate::resolver_pool::PublicResolverPool;
use crate::routing::{Route, RoutingTable};
use crate::transfer_acl::TransferAllowList;

const LOCAL_CONFIG_PATH: &str = "ferrous-proxy.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-proxy/config.toml";

/// Main configuration structure for Ferrous Proxy
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream exchange settings and fallback pool
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Domain suffix routes
    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    /// Zone transfer allow-list
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-proxy.toml in current directory
    /// 3. /etc/ferrous-proxy/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Flags extend the file's routes and replace its lists.
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) -> Result<(), ConfigError> {
        if let Some(address) = overrides.address {
            self.server.address = address;
        }
        for list in &overrides.routes {
            self.routes.extend(parse_route_list(list)?);
        }
        if let Some(allow) = overrides.allow_transfer {
            self.transfer.allow = split_csv(&allow);
        }
        if let Some(defaults) = overrides.default_servers {
            self.upstream.default_servers = split_csv(&defaults);
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.upstream.timeout_ms = timeout_ms;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.listen_addr()?;

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        self.routing_table()?;
        self.resolver_pool()?;
        Ok(())
    }

    pub fn routing_table(&self) -> Result<RoutingTable, ConfigError> {
        let routes = self
            .routes
            .iter()
            .map(|r| {
                let upstream = r.upstream.parse().map_err(|e| {
                    ConfigError::Validation(format!("route '{}': {}", r.suffix, e))
                })?;
                Route::new(&r.suffix, upstream)
                    .map_err(|e| ConfigError::Validation(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RoutingTable::new(routes))
    }

    pub fn allow_list(&self) -> TransferAllowList {
        TransferAllowList::new(&self.transfer.allow)
    }

    pub fn resolver_pool(&self) -> Result<PublicResolverPool, ConfigError> {
        if self.upstream.default_servers.is_empty() {
            return Ok(PublicResolverPool::builtin());
        }
        PublicResolverPool::from_servers(&self.upstream.default_servers)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream.timeout_ms)
    }

    pub fn tcp_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.server.tcp_idle_timeout_secs)
    }
}

fn split_csv(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub address: Option<String>,
    /// Each entry is a comma separated `domain=host:port` list.
    pub routes: Vec<String>,
    pub allow_transfer: Option<String>,
    pub default_servers: Option<String>,
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
