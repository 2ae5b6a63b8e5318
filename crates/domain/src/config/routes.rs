use super::errors::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    pub suffix: String,
    pub upstream: String,
}

impl RouteConfig {
    pub fn new(suffix: impl Into<String>, upstream: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            upstream: upstream.into(),
        }
    }
}

/// Parses `domain=host:port[,domain=host:port...]`.
pub fn parse_route_list(list: &str) -> Result<Vec<RouteConfig>, ConfigError> {
    if list.trim().is_empty() {
        return Ok(vec![]);
    }

    list.split(',')
        .map(|entry| match entry.split_once('=') {
            Some((suffix, upstream)) if !suffix.trim().is_empty() => {
                Ok(RouteConfig::new(suffix.trim(), upstream.trim()))
            }
            _ => Err(ConfigError::Validation(format!(
                "invalid route '{}', must be list of domain=host:port",
                entry
            ))),
        })
        .collect()
}
