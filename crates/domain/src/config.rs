pub mod errors;
pub mod logging;
pub mod root;
pub mod routes;
pub mod server;
pub mod transfer;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use routes::{parse_route_list, RouteConfig};
pub use server::ServerConfig;
pub use transfer::TransferConfig;
pub use upstream::UpstreamConfig;
