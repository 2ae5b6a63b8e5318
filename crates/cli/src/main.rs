use clap::Parser;
use ferrous_proxy_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-proxy")]
#[command(version)]
#[command(about = "Ferrous Proxy - DNS reverse proxy with suffix routing and zone transfer gating")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address for UDP and TCP, e.g. ":53" or "127.0.0.1:5353"
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// Routes as a comma separated list of domain=host:port (repeatable)
    #[arg(short = 'r', long = "route", value_name = "LIST")]
    routes: Vec<String>,

    /// Client IPs allowed to request AXFR/IXFR, comma separated
    #[arg(long, value_name = "LIST")]
    allow_transfer: Option<String>,

    /// Fallback upstreams (host:port, comma separated) replacing the built-in pool
    #[arg(long = "default", value_name = "LIST")]
    default_servers: Option<String>,

    /// Upstream timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            address: self.address.clone(),
            routes: self.routes.clone(),
            allow_transfer: self.allow_transfer.clone(),
            default_servers: self.default_servers.clone(),
            timeout_ms: self.timeout_ms,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Proxy v{}", env!("CARGO_PKG_VERSION"));

    let services = di::ProxyServices::new(&config)?;

    let listen_addr = config.server.listen_addr()?;
    let listeners = server::bind_listeners(listen_addr)?;

    let shutdown = CancellationToken::new();
    let dns_server = tokio::spawn(server::run_dns_server(
        listeners,
        services.handler,
        config.tcp_idle_timeout(),
        shutdown.clone(),
    ));

    bootstrap::shutdown_signal().await;
    shutdown.cancel();

    if let Err(e) = dns_server.await {
        error!(error = %e, "DNS server task failed");
    }

    info!("Server shutdown complete");
    Ok(())
}
