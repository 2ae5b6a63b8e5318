//! Mapping between `ferrous_proxy_domain::RecordType` and `hickory_proto::rr::RecordType`
//!
//! Both sides are total over the 16-bit type space, so the conversion goes
//! through the numeric code and never loses a type the proxy has to relay.

use ferrous_proxy_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

/// Bidirectional mapper between domain and hickory record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
