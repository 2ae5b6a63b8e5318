mod response_sink;
mod upstream_forwarder;

pub use response_sink::ResponseSink;
pub use upstream_forwarder::UpstreamForwarder;
