use hickory_proto::error::ProtoError;
use hickory_proto::op::{Message, ResponseCode};

/// Builds the failure reply for `request`: SERVFAIL with the request's id,
/// opcode, question section and RD flag.
pub fn build_servfail_response(request: &Message) -> Result<Vec<u8>, ProtoError> {
    let mut response = Message::error_msg(request.id(), request.op_code(), ResponseCode::ServFail);
    response.add_queries(request.queries().iter().cloned());
    response.set_recursion_desired(request.recursion_desired());
    response.to_vec()
}
