mod handle_query;
mod select_upstream;

pub use handle_query::{ProxyOutcome, ProxyQueryUseCase};
pub use select_upstream::{UpstreamSelector, UpstreamTarget};
