//! NBT (Named Binary Tag) for Minecraft Bedrock Edition, network variant.
//!
//! Network NBT is what BlockActorData and item user data carry on the wire:
//! ints are VarInt (ZigZag), string lengths are VarUInt32, shorts and
//! longs stay little-endian.

pub mod error;
mod io;
mod network;
pub mod tag;

pub use error::NbtError;
pub use tag::{NbtCompound, NbtRoot, NbtTag};

use bytes::{Buf, BufMut};

/// Read network NBT (VarInt variant) from a buffer.
pub fn read_nbt_network(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt(buf)
}

/// Write network NBT (VarInt variant) to a buffer.
pub fn write_nbt_network(buf: &mut impl BufMut, root: &NbtRoot) {
    io::write_nbt(buf, root)
}

/// Serialize a compound with an empty root name into a fresh byte vector.
pub fn to_network_bytes(compound: &NbtCompound) -> Vec<u8> {
    let root = NbtRoot::new("", compound.clone());
    let mut buf = Vec::new();
    write_nbt_network(&mut buf, &root);
    buf
}
