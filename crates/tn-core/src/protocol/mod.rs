//! Boundary protocol: message types, the strict JSON codec, and request ids.

pub mod codec;
pub mod messages;
pub mod sequence;

pub use codec::{decode_reply, decode_request, encode_reply, encode_request, ProtocolError};
pub use messages::{HostReply, ShellRequest};
pub use sequence::RequestCounter;
