//! Container window packets.
//!
//! ContainerOpen (0x2E, server → client) opens the window of the block
//! container at a position. ContainerClose (0x2F) goes both ways: the
//! client reports a window it closed, the server forces one shut.

use bytes::{Buf, BufMut};

use crate::codec::{ensure_remaining, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{BlockPos, VarLong};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerOpen {
    pub window_id: u8,
    /// 0 = generic container (chest).
    pub container_type: u8,
    pub position: BlockPos,
    /// -1 when the container is a block rather than an entity.
    pub entity_unique_id: i64,
}

impl ContainerOpen {
    pub fn for_block(window_id: u8, container_type: u8, position: BlockPos) -> Self {
        Self {
            window_id,
            container_type,
            position,
            entity_unique_id: -1,
        }
    }
}

impl ProtoEncode for ContainerOpen {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.window_id);
        buf.put_u8(self.container_type);
        self.position.proto_encode(buf);
        VarLong(self.entity_unique_id).proto_encode(buf);
    }
}

impl ProtoDecode for ContainerOpen {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, 2)?;
        let window_id = buf.get_u8();
        let container_type = buf.get_u8();
        Ok(Self {
            window_id,
            container_type,
            position: BlockPos::proto_decode(buf)?,
            entity_unique_id: VarLong::proto_decode(buf)?.0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerClose {
    pub window_id: u8,
    pub container_type: u8,
    pub server_initiated: bool,
}

impl ProtoEncode for ContainerClose {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_slice(&[
            self.window_id,
            self.container_type,
            self.server_initiated as u8,
        ]);
    }
}

impl ProtoDecode for ContainerClose {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, 3)?;
        Ok(Self {
            window_id: buf.get_u8(),
            container_type: buf.get_u8(),
            server_initiated: buf.get_u8() != 0,
        })
    }
}
