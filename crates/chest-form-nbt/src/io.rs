//! NBT read/write engine for the network variant.

use bytes::{Buf, BufMut};

use crate::error::NbtError;
use crate::network::{read_array_len, read_int, read_string_len, write_int, write_string_len};
use crate::tag::{NbtCompound, NbtRoot, NbtTag};

/// Maximum nesting depth to prevent stack overflow.
const MAX_DEPTH: usize = 512;

// -----------------------------------------------------------------------
// Reading
// -----------------------------------------------------------------------

pub(crate) fn read_nbt(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    if !buf.has_remaining() {
        return Err(NbtError::UnexpectedEof);
    }
    let tag_type = buf.get_u8();
    if tag_type != 10 {
        return Err(NbtError::ExpectedCompound { got: tag_type });
    }
    let name = read_string(buf)?;
    let compound = read_compound(buf, 0)?;
    Ok(NbtRoot { name, compound })
}

fn read_tag(buf: &mut impl Buf, tag_type: u8, depth: usize) -> Result<NbtTag, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }

    match tag_type {
        1 => {
            ensure_remaining(buf, 1)?;
            Ok(NbtTag::Byte(buf.get_i8()))
        }
        2 => {
            ensure_remaining(buf, 2)?;
            Ok(NbtTag::Short(buf.get_i16_le()))
        }
        3 => Ok(NbtTag::Int(read_int(buf)?)),
        4 => {
            ensure_remaining(buf, 8)?;
            Ok(NbtTag::Long(buf.get_i64_le()))
        }
        5 => {
            ensure_remaining(buf, 4)?;
            Ok(NbtTag::Float(buf.get_f32_le()))
        }
        6 => {
            ensure_remaining(buf, 8)?;
            Ok(NbtTag::Double(buf.get_f64_le()))
        }
        7 => {
            let len = read_array_len(buf)?;
            ensure_remaining(buf, len)?;
            let arr = (0..len).map(|_| buf.get_i8()).collect();
            Ok(NbtTag::ByteArray(arr))
        }
        8 => Ok(NbtTag::String(read_string(buf)?)),
        9 => {
            ensure_remaining(buf, 1)?;
            let element_type = buf.get_u8();
            let len = read_array_len(buf)?;
            let mut list = Vec::new();
            for _ in 0..len {
                list.push(read_tag(buf, element_type, depth + 1)?);
            }
            Ok(NbtTag::List(list))
        }
        10 => Ok(NbtTag::Compound(read_compound(buf, depth + 1)?)),
        11 => {
            let len = read_array_len(buf)?;
            let mut arr = Vec::new();
            for _ in 0..len {
                arr.push(read_int(buf)?);
            }
            Ok(NbtTag::IntArray(arr))
        }
        12 => {
            let len = read_array_len(buf)?;
            ensure_remaining(buf, len.saturating_mul(8))?;
            let arr = (0..len).map(|_| buf.get_i64_le()).collect();
            Ok(NbtTag::LongArray(arr))
        }
        _ => Err(NbtError::UnknownTagType(tag_type)),
    }
}

fn read_compound(buf: &mut impl Buf, depth: usize) -> Result<NbtCompound, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }
    let mut map = NbtCompound::new();
    loop {
        ensure_remaining(buf, 1)?;
        let tag_type = buf.get_u8();
        if tag_type == 0 {
            break; // TAG_End
        }
        let name = read_string(buf)?;
        let tag = read_tag(buf, tag_type, depth)?;
        map.insert(name, tag);
    }
    Ok(map)
}

fn read_string(buf: &mut impl Buf) -> Result<String, NbtError> {
    let len = read_string_len(buf)?;
    ensure_remaining(buf, len)?;
    let data = buf.copy_to_bytes(len);
    String::from_utf8(data.to_vec()).map_err(|_| NbtError::InvalidUtf8)
}

fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), NbtError> {
    if buf.remaining() < needed {
        Err(NbtError::UnexpectedEof)
    } else {
        Ok(())
    }
}

// -----------------------------------------------------------------------
// Writing
// -----------------------------------------------------------------------

pub(crate) fn write_nbt(buf: &mut impl BufMut, root: &NbtRoot) {
    buf.put_u8(10); // TAG_Compound
    write_string(buf, &root.name);
    write_compound(buf, &root.compound);
}

fn write_tag(buf: &mut impl BufMut, tag: &NbtTag) {
    match tag {
        NbtTag::Byte(v) => buf.put_i8(*v),
        NbtTag::Short(v) => buf.put_i16_le(*v),
        NbtTag::Int(v) => write_int(buf, *v),
        NbtTag::Long(v) => buf.put_i64_le(*v),
        NbtTag::Float(v) => buf.put_f32_le(*v),
        NbtTag::Double(v) => buf.put_f64_le(*v),
        NbtTag::ByteArray(arr) => {
            write_int(buf, arr.len() as i32);
            for &b in arr {
                buf.put_i8(b);
            }
        }
        NbtTag::String(s) => write_string(buf, s),
        NbtTag::List(list) => {
            // Empty lists carry TAG_End as their element type.
            let element_type = list.first().map(NbtTag::tag_type_id).unwrap_or(0);
            buf.put_u8(element_type);
            write_int(buf, list.len() as i32);
            for item in list {
                write_tag(buf, item);
            }
        }
        NbtTag::Compound(map) => write_compound(buf, map),
        NbtTag::IntArray(arr) => {
            write_int(buf, arr.len() as i32);
            for &v in arr {
                write_int(buf, v);
            }
        }
        NbtTag::LongArray(arr) => {
            write_int(buf, arr.len() as i32);
            for &v in arr {
                buf.put_i64_le(v);
            }
        }
    }
}

fn write_compound(buf: &mut impl BufMut, map: &NbtCompound) {
    for (name, tag) in map {
        buf.put_u8(tag.tag_type_id());
        write_string(buf, name);
        write_tag(buf, tag);
    }
    buf.put_u8(0); // TAG_End
}

fn write_string(buf: &mut impl BufMut, s: &str) {
    write_string_len(buf, s.len());
    buf.put_slice(s.as_bytes());
}
