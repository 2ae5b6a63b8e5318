pub mod dns;

pub use dns::{bind_listeners, run_dns_server};
