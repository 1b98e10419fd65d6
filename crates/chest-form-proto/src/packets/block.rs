//! Block packets, server → client.
//!
//! UpdateBlock (0x15) swaps the block a client sees at a position.
//! BlockActorData (0x38) hands the client the block entity NBT for it,
//! which for a chest carries the title and the `Items` list.
//!
//! Neither touches the world itself: a later UpdateBlock with the real
//! runtime id is enough to undo both.

use bytes::{Buf, BufMut};

use crate::codec::{ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{BlockPos, VarUInt32};

/// Notify neighbours.
pub const BLOCK_FLAG_NEIGHBORS: u32 = 0x01;
/// Sync over the network.
pub const BLOCK_FLAG_NETWORK: u32 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBlock {
    pub position: BlockPos,
    pub runtime_id: u32,
    pub flags: u32,
    /// 0 = solid layer, 1 = liquid layer.
    pub layer: u32,
}

impl UpdateBlock {
    /// Solid-layer update with neighbour and network flags.
    pub fn new(position: BlockPos, runtime_id: u32) -> Self {
        Self {
            position,
            runtime_id,
            flags: BLOCK_FLAG_NEIGHBORS | BLOCK_FLAG_NETWORK,
            layer: 0,
        }
    }
}

impl ProtoEncode for UpdateBlock {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.position.proto_encode(buf);
        for v in [self.runtime_id, self.flags, self.layer] {
            VarUInt32(v).proto_encode(buf);
        }
    }
}

impl ProtoDecode for UpdateBlock {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            position: BlockPos::proto_decode(buf)?,
            runtime_id: VarUInt32::proto_decode(buf)?.0,
            flags: VarUInt32::proto_decode(buf)?.0,
            layer: VarUInt32::proto_decode(buf)?.0,
        })
    }
}

/// Block entity NBT for one position. The NBT is kept as already-encoded
/// network bytes so this crate stays independent of the tag model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockActorData {
    pub position: BlockPos,
    pub nbt_data: Vec<u8>,
}

impl BlockActorData {
    pub fn new(position: BlockPos, nbt_data: Vec<u8>) -> Self {
        Self { position, nbt_data }
    }
}

impl ProtoEncode for BlockActorData {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.position.proto_encode(buf);
        buf.put_slice(&self.nbt_data);
    }
}

impl ProtoDecode for BlockActorData {
    /// Everything after the position is NBT.
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let position = BlockPos::proto_decode(buf)?;
        let nbt_data = buf.copy_to_bytes(buf.remaining()).to_vec();
        Ok(Self { position, nbt_data })
    }
}
