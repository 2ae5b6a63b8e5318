use ferrous_proxy_domain::config::{parse_route_list, RouteConfig};
use ferrous_proxy_domain::{CliOverrides, Config, ConfigError, UpstreamAddr};
use std::time::Duration;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.address, "[::]:53");
    assert_eq!(config.server.tcp_idle_timeout_secs, 10);
    assert_eq!(config.upstream.timeout_ms, 2000);
    assert!(config.upstream.default_servers.is_empty());
    assert!(config.routes.is_empty());
    assert!(config.transfer.allow.is_empty());
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_listen_addr_accepts_port_only_form() {
    let mut config = Config::default();
    config.server.address = ":5353".to_string();

    let addr = config.server.listen_addr().unwrap();
    assert!(addr.is_ipv6());
    assert_eq!(addr.port(), 5353);
}

#[test]
fn test_listen_addr_rejects_garbage() {
    let mut config = Config::default();
    config.server.address = "not-an-address".to_string();

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_parse_toml() {
    let config = Config::from_toml_str(
        r#"
        [server]
        address = "127.0.0.1:5353"

        [upstream]
        timeout_ms = 500

        [[routes]]
        suffix = ".example.com."
        upstream = "8.8.4.4:53"

        [transfer]
        allow = ["1.2.3.4", "::1"]

        [logging]
        level = "debug"
        json = true
        "#,
    )
    .unwrap();

    assert_eq!(config.server.address, "127.0.0.1:5353");
    assert_eq!(config.upstream_timeout(), Duration::from_millis(500));
    assert_eq!(config.routes, vec![RouteConfig::new(".example.com.", "8.8.4.4:53")]);
    assert_eq!(config.allow_list().len(), 2);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_toml_rejects_invalid_syntax() {
    let result = Config::from_toml_str("[server\naddress = 1");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_parse_route_list() {
    let routes = parse_route_list(".example.com.=8.8.4.4:53,corp=10.0.0.1:53").unwrap();

    assert_eq!(
        routes,
        vec![
            RouteConfig::new(".example.com.", "8.8.4.4:53"),
            RouteConfig::new("corp", "10.0.0.1:53"),
        ]
    );
}

#[test]
fn test_parse_route_list_empty() {
    assert!(parse_route_list("").unwrap().is_empty());
}

#[test]
fn test_parse_route_list_rejects_missing_separator() {
    let result = parse_route_list("example.com");
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_cli_overrides() {
    let mut config = Config::default();
    config.routes.push(RouteConfig::new("lan.", "192.168.1.1:53"));

    config
        .apply_cli_overrides(CliOverrides {
            address: Some(":8053".to_string()),
            routes: vec!["example.com=8.8.4.4:53".to_string()],
            allow_transfer: Some("1.2.3.4,,::1".to_string()),
            default_servers: Some("9.9.9.9:53".to_string()),
            timeout_ms: Some(750),
            log_level: Some("warn".to_string()),
        })
        .unwrap();

    assert_eq!(config.server.address, ":8053");
    assert_eq!(config.routes.len(), 2);
    assert_eq!(config.transfer.allow, vec!["1.2.3.4", "::1"]);
    assert_eq!(config.upstream.default_servers, vec!["9.9.9.9:53"]);
    assert_eq!(config.upstream.timeout_ms, 750);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_routing_table_from_config() {
    let mut config = Config::default();
    config.routes.push(RouteConfig::new("example.com", "8.8.4.4:53"));

    let table = config.routing_table().unwrap();
    let route = table.lookup("subdomain.example.com.").unwrap();
    assert_eq!(route.suffix(), "example.com.");
}

#[test]
fn test_invalid_route_upstream_fails_validation() {
    let mut config = Config::default();
    config.routes.push(RouteConfig::new("example.com", "8.8.4.4"));

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_resolver_pool_defaults_to_builtin() {
    let config = Config::default();
    let pool = config.resolver_pool().unwrap();
    assert!(pool.len() > 1);
}

#[test]
fn test_resolver_pool_uses_default_servers() {
    let mut config = Config::default();
    config.upstream.default_servers = vec!["9.9.9.9:53".to_string()];

    let pool = config.resolver_pool().unwrap();
    assert_eq!(pool.servers(), &["9.9.9.9:53".parse::<UpstreamAddr>().unwrap()]);
}

#[test]
fn test_zero_timeout_fails_validation() {
    let mut config = Config::default();
    config.upstream.timeout_ms = 0;

    assert!(config.validate().is_err());
}
