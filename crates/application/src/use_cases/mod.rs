pub mod proxy;

pub use proxy::{ProxyOutcome, ProxyQueryUseCase, UpstreamSelector, UpstreamTarget};
