pub mod forwarding;
pub mod query_parser;
pub mod response_sink;
pub mod server;
pub mod transport;
pub mod wire_response;

pub use forwarding::{DnsForwarder, RecordTypeMapper, TransferProgress, TransferTracker};
pub use query_parser::{parse_query, ParseError, ParsedQuery};
pub use response_sink::{TcpResponseSink, UdpResponseSink};
pub use server::{DnsServerHandler, HandleOutcome};
