//! Bedrock protocol primitives and the packets used by chest forms.

pub mod codec;
pub mod error;
pub mod packets;
pub mod types;
