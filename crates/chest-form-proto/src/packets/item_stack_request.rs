//! ItemStackRequest (0x93), client → server.
//!
//! The client sends inventory manipulation requests. Chest forms only look
//! for `Take` actions, but every known action has to be decoded to walk
//! past it.

use bytes::{Buf, BufMut};

use crate::codec::{ensure_remaining, read_string, write_string, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{VarInt, VarUInt32};

/// A reference to a specific container slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSlot {
    /// Container ID (0 = inventory, 7 = level entity, 58 = cursor, ...).
    pub container_id: u8,
    /// Slot index within the container.
    pub slot: u8,
    /// Server-assigned stack network ID for the item in this slot.
    /// 0 when the server never assigned one.
    pub stack_network_id: i32,
}

impl StackSlot {
    pub fn new(container_id: u8, slot: u8, stack_network_id: i32) -> Self {
        Self {
            container_id,
            slot,
            stack_network_id,
        }
    }
}

impl ProtoEncode for StackSlot {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.container_id);
        buf.put_u8(self.slot);
        VarInt(self.stack_network_id).proto_encode(buf);
    }
}

impl ProtoDecode for StackSlot {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, 2)?;
        let container_id = buf.get_u8();
        let slot = buf.get_u8();
        let stack_network_id = VarInt::proto_decode(buf)?.0;
        Ok(Self {
            container_id,
            slot,
            stack_network_id,
        })
    }
}

/// Individual action within an ItemStackRequest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackAction {
    Take {
        count: u8,
        src: StackSlot,
        dst: StackSlot,
    },
    Place {
        count: u8,
        src: StackSlot,
        dst: StackSlot,
    },
    Swap {
        src: StackSlot,
        dst: StackSlot,
    },
    Drop {
        count: u8,
        src: StackSlot,
        randomly: bool,
    },
    Destroy {
        count: u8,
        src: StackSlot,
    },
    Consume {
        count: u8,
        src: StackSlot,
    },
    Create {
        result_slot: u8,
    },
    /// Craft a recipe by network ID (action type 12).
    CraftRecipe {
        recipe_network_id: u32,
    },
    /// Auto-craft a recipe (shift-click craft) (action type 13).
    CraftRecipeAuto {
        recipe_network_id: u32,
        times_crafted: u8,
        ingredients: Vec<u8>,
    },
    CraftCreative {
        creative_item_network_id: u32,
    },
    /// Enchanting table option selection (action type 15).
    CraftRecipeOptional {
        recipe_network_id: u32,
        filter_string_index: i32,
    },
    /// Grindstone (action type 16).
    CraftGrindstone {
        recipe_network_id: u32,
    },
    /// Loom (action type 17).
    CraftLoom {
        pattern_id: String,
    },
    /// An action type whose payload size is unknown. Decoding stops here.
    Unknown {
        action_type: u8,
    },
}

impl StackAction {
    /// Numeric action type as sent on the wire.
    pub fn action_type(&self) -> u8 {
        match self {
            StackAction::Take { .. } => 0,
            StackAction::Place { .. } => 1,
            StackAction::Swap { .. } => 2,
            StackAction::Drop { .. } => 3,
            StackAction::Destroy { .. } => 4,
            StackAction::Consume { .. } => 5,
            StackAction::Create { .. } => 6,
            StackAction::CraftRecipe { .. } => 12,
            StackAction::CraftRecipeAuto { .. } => 13,
            StackAction::CraftCreative { .. } => 14,
            StackAction::CraftRecipeOptional { .. } => 15,
            StackAction::CraftGrindstone { .. } => 16,
            StackAction::CraftLoom { .. } => 17,
            StackAction::Unknown { action_type } => *action_type,
        }
    }
}

/// A single request containing one or more actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRequest {
    pub request_id: i32,
    pub actions: Vec<StackAction>,
    pub filter_strings: Vec<String>,
    pub filter_cause: i32,
}

impl StackRequest {
    /// A request with the given actions and no filter strings.
    pub fn new(request_id: i32, actions: Vec<StackAction>) -> Self {
        Self {
            request_id,
            actions,
            filter_strings: Vec::new(),
            filter_cause: 0,
        }
    }
}

/// The complete ItemStackRequest packet containing one or more requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStackRequest {
    pub requests: Vec<StackRequest>,
}

impl ItemStackRequest {
    /// Iterate over every action of every request, in wire order.
    pub fn actions(&self) -> impl Iterator<Item = &StackAction> {
        self.requests.iter().flat_map(|r| r.actions.iter())
    }
}

impl ProtoEncode for ItemStackRequest {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.requests.len() as u32).proto_encode(buf);
        for req in &self.requests {
            VarInt(req.request_id).proto_encode(buf);
            VarUInt32(req.actions.len() as u32).proto_encode(buf);
            for action in &req.actions {
                encode_stack_action(buf, action);
            }
            VarUInt32(req.filter_strings.len() as u32).proto_encode(buf);
            for s in &req.filter_strings {
                write_string(buf, s);
            }
            VarInt(req.filter_cause).proto_encode(buf);
        }
    }
}

impl ProtoDecode for ItemStackRequest {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let count = VarUInt32::proto_decode(buf)?.0;
        let mut requests = Vec::new();
        for _ in 0..count {
            let (request, complete) = decode_stack_request(buf)?;
            requests.push(request);
            if !complete {
                // The unknown action left the cursor at an unknown offset.
                break;
            }
        }
        Ok(Self { requests })
    }
}

/// Decode one request. The flag is `false` when decoding stopped early at
/// an unknown action.
fn decode_stack_request(buf: &mut impl Buf) -> Result<(StackRequest, bool), ProtoError> {
    let request_id = VarInt::proto_decode(buf)?.0;

    let action_count = VarUInt32::proto_decode(buf)?.0;
    let mut actions = Vec::new();
    for _ in 0..action_count {
        let action = decode_stack_action(buf)?;
        let unknown = matches!(action, StackAction::Unknown { .. });
        actions.push(action);
        if unknown {
            return Ok((StackRequest::new(request_id, actions), false));
        }
    }

    // Filter strings (text input from anvil, etc.)
    let filter_count = VarUInt32::proto_decode(buf)?.0;
    let mut filter_strings = Vec::new();
    for _ in 0..filter_count {
        filter_strings.push(read_string(buf)?);
    }

    let filter_cause = VarInt::proto_decode(buf)?.0;

    Ok((
        StackRequest {
            request_id,
            actions,
            filter_strings,
            filter_cause,
        },
        true,
    ))
}

fn get_u8(buf: &mut impl Buf) -> Result<u8, ProtoError> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8())
}

fn decode_stack_action(buf: &mut impl Buf) -> Result<StackAction, ProtoError> {
    let action_type = get_u8(buf)?;

    let action = match action_type {
        0 => StackAction::Take {
            count: get_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
            dst: StackSlot::proto_decode(buf)?,
        },
        1 => StackAction::Place {
            count: get_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
            dst: StackSlot::proto_decode(buf)?,
        },
        2 => StackAction::Swap {
            src: StackSlot::proto_decode(buf)?,
            dst: StackSlot::proto_decode(buf)?,
        },
        3 => StackAction::Drop {
            count: get_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
            randomly: get_u8(buf)? != 0,
        },
        4 => StackAction::Destroy {
            count: get_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
        },
        5 => StackAction::Consume {
            count: get_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
        },
        6 => StackAction::Create {
            result_slot: get_u8(buf)?,
        },
        12 => StackAction::CraftRecipe {
            recipe_network_id: VarUInt32::proto_decode(buf)?.0,
        },
        13 => {
            let recipe_network_id = VarUInt32::proto_decode(buf)?.0;
            let times_crafted = get_u8(buf)?;
            let ingredient_count = VarUInt32::proto_decode(buf)?.0 as usize;
            ensure_remaining(buf, ingredient_count)?;
            let mut ingredients = vec![0u8; ingredient_count];
            buf.copy_to_slice(&mut ingredients);
            StackAction::CraftRecipeAuto {
                recipe_network_id,
                times_crafted,
                ingredients,
            }
        }
        14 => StackAction::CraftCreative {
            creative_item_network_id: VarUInt32::proto_decode(buf)?.0,
        },
        15 => StackAction::CraftRecipeOptional {
            recipe_network_id: VarUInt32::proto_decode(buf)?.0,
            filter_string_index: VarInt::proto_decode(buf)?.0,
        },
        16 => StackAction::CraftGrindstone {
            recipe_network_id: VarUInt32::proto_decode(buf)?.0,
        },
        17 => StackAction::CraftLoom {
            pattern_id: read_string(buf)?,
        },
        _ => StackAction::Unknown { action_type },
    };
    Ok(action)
}

fn encode_stack_action(buf: &mut impl BufMut, action: &StackAction) {
    buf.put_u8(action.action_type());
    match action {
        StackAction::Take { count, src, dst } | StackAction::Place { count, src, dst } => {
            buf.put_u8(*count);
            src.proto_encode(buf);
            dst.proto_encode(buf);
        }
        StackAction::Swap { src, dst } => {
            src.proto_encode(buf);
            dst.proto_encode(buf);
        }
        StackAction::Drop {
            count,
            src,
            randomly,
        } => {
            buf.put_u8(*count);
            src.proto_encode(buf);
            buf.put_u8(*randomly as u8);
        }
        StackAction::Destroy { count, src } | StackAction::Consume { count, src } => {
            buf.put_u8(*count);
            src.proto_encode(buf);
        }
        StackAction::Create { result_slot } => buf.put_u8(*result_slot),
        StackAction::CraftRecipe { recipe_network_id }
        | StackAction::CraftGrindstone { recipe_network_id } => {
            VarUInt32(*recipe_network_id).proto_encode(buf);
        }
        StackAction::CraftRecipeAuto {
            recipe_network_id,
            times_crafted,
            ingredients,
        } => {
            VarUInt32(*recipe_network_id).proto_encode(buf);
            buf.put_u8(*times_crafted);
            VarUInt32(ingredients.len() as u32).proto_encode(buf);
            buf.put_slice(ingredients);
        }
        StackAction::CraftCreative {
            creative_item_network_id,
        } => VarUInt32(*creative_item_network_id).proto_encode(buf),
        StackAction::CraftRecipeOptional {
            recipe_network_id,
            filter_string_index,
        } => {
            VarUInt32(*recipe_network_id).proto_encode(buf);
            VarInt(*filter_string_index).proto_encode(buf);
        }
        StackAction::CraftLoom { pattern_id } => write_string(buf, pattern_id),
        StackAction::Unknown { .. } => {}
    }
}
