//! Network NBT integer and length encodings (VarInt / VarUInt32).

use bytes::{Buf, BufMut};
use chest_form_proto::codec::{ProtoDecode, ProtoEncode};
use chest_form_proto::types::{VarInt, VarUInt32};

use crate::error::NbtError;

pub(crate) fn write_int(buf: &mut impl BufMut, value: i32) {
    VarInt(value).proto_encode(buf);
}

pub(crate) fn read_int(buf: &mut impl Buf) -> Result<i32, NbtError> {
    Ok(VarInt::proto_decode(buf)?.0)
}

/// Array and list lengths are signed VarInts.
pub(crate) fn read_array_len(buf: &mut impl Buf) -> Result<usize, NbtError> {
    let len = read_int(buf)?;
    if len < 0 {
        return Err(NbtError::NegativeLength(len));
    }
    Ok(len as usize)
}

pub(crate) fn write_string_len(buf: &mut impl BufMut, len: usize) {
    VarUInt32(len as u32).proto_encode(buf);
}

pub(crate) fn read_string_len(buf: &mut impl Buf) -> Result<usize, NbtError> {
    Ok(VarUInt32::proto_decode(buf)?.0 as usize)
}
