//! Protocol encoding/decoding traits and helpers.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// Write a Bedrock protocol string (VarUInt32 length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    VarUInt32(s.len() as u32).proto_encode(buf);
    buf.put_slice(s.as_bytes());
}

/// Read a Bedrock protocol string (VarUInt32 length + UTF-8).
pub fn read_string(buf: &mut impl Buf) -> Result<String, ProtoError> {
    let len = VarUInt32::proto_decode(buf)?.0 as usize;
    ensure_remaining(buf, len)?;
    let data = buf.copy_to_bytes(len);
    String::from_utf8(data.to_vec()).map_err(|_| ProtoError::InvalidUtf8)
}

/// Fail with `BufferTooShort` unless `needed` bytes are left.
pub fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), ProtoError> {
    if buf.remaining() < needed {
        Err(ProtoError::BufferTooShort {
            needed,
            remaining: buf.remaining(),
        })
    } else {
        Ok(())
    }
}

/// Encode a packet body (without the packet id header).
pub fn encode_packet(packet: &impl ProtoEncode) -> Bytes {
    let mut buf = BytesMut::new();
    packet.proto_encode(&mut buf);
    buf.freeze()
}

/// Prepend the VarUInt32 packet id to a packet body, producing a sub-packet
/// ready to be placed in a game batch.
pub fn frame_sub_packet(packet_id: u32, body: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(body.len() + VarUInt32::MAX_BYTES);
    VarUInt32(packet_id).proto_encode(&mut buf);
    buf.put_slice(body);
    buf.freeze()
}

/// Split a sub-packet into its packet id and body.
pub fn split_sub_packet(mut data: Bytes) -> Result<(u32, Bytes), ProtoError> {
    let packet_id = VarUInt32::proto_decode(&mut data)?.0;
    Ok((packet_id, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_roundtrip() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Hello, Bedrock!");
        let result = read_string(&mut buf.freeze()).unwrap();
        assert_eq!(result, "Hello, Bedrock!");
    }

    #[test]
    fn string_unicode() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "§6Menu §r日本語");
        let result = read_string(&mut buf.freeze()).unwrap();
        assert_eq!(result, "§6Menu §r日本語");
    }

    #[test]
    fn string_buffer_too_short() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Hello");
        let truncated = buf.freeze().slice(..3);
        assert!(matches!(
            read_string(&mut truncated.clone()),
            Err(ProtoError::BufferTooShort { needed: 5, remaining: 2 })
        ));
    }

    #[test]
    fn sub_packet_framing() {
        let framed = frame_sub_packet(0x93, &[1, 2, 3]);
        // 0x93 needs two LEB128 bytes
        assert_eq!(&framed[..], &[0x93, 0x01, 1, 2, 3]);
        let (id, body) = split_sub_packet(framed).unwrap();
        assert_eq!(id, 0x93);
        assert_eq!(&body[..], &[1, 2, 3]);
    }

    #[test]
    fn split_empty_sub_packet_fails() {
        assert!(split_sub_packet(Bytes::new()).is_err());
    }
}
