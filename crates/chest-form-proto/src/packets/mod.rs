//! Game packet definitions used to forge and tear down chest forms.

pub mod block;
pub mod container;
pub mod item_stack_request;

pub use block::{BlockActorData, UpdateBlock};
pub use container::{ContainerClose, ContainerOpen};
pub use item_stack_request::{ItemStackRequest, StackAction, StackRequest, StackSlot};

/// Game packet IDs.
pub mod id {
    pub const UPDATE_BLOCK: u32 = 0x15;
    pub const CONTAINER_OPEN: u32 = 0x2E;
    pub const CONTAINER_CLOSE: u32 = 0x2F;
    pub const BLOCK_ACTOR_DATA: u32 = 0x38;
    pub const ITEM_STACK_REQUEST: u32 = 0x93;
}

/// Human-readable packet name for logging.
pub fn packet_name(packet_id: u32) -> &'static str {
    match packet_id {
        id::UPDATE_BLOCK => "UpdateBlock",
        id::CONTAINER_OPEN => "ContainerOpen",
        id::CONTAINER_CLOSE => "ContainerClose",
        id::BLOCK_ACTOR_DATA => "BlockActorData",
        id::ITEM_STACK_REQUEST => "ItemStackRequest",
        _ => "Unknown",
    }
}
