pub mod forwarder;
pub mod record_type_map;
pub mod zone_transfer;

pub use forwarder::DnsForwarder;
pub use record_type_map::RecordTypeMapper;
pub use zone_transfer::{stream_transfer, TransferProgress, TransferTracker};
