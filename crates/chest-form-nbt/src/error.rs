//! Errors raised while reading network NBT.

use chest_form_proto::error::ProtoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("NBT ended early")]
    UnexpectedEof,

    #[error("root tag must be a compound (10), found {got}")]
    ExpectedCompound { got: u8 },

    #[error("unknown tag type {0}")]
    UnknownTagType(u8),

    #[error("NBT string is not UTF-8")]
    InvalidUtf8,

    #[error("NBT nested deeper than {limit}")]
    NestingTooDeep { limit: usize },

    #[error("negative length {0}")]
    NegativeLength(i32),

    /// A VarInt or VarUInt32 could not be read.
    #[error(transparent)]
    Integer(#[from] ProtoError),
}
