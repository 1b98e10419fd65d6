//! Packets that make a chest appear, open, close and vanish on one client.
//!
//! Nothing here touches the real world: every block is a client-side
//! substitution that [`revert`] undoes by resending what the world holds.

use chest_form_nbt::{to_network_bytes, NbtCompound, NbtTag};
use chest_form_proto::codec::{encode_packet, ProtoEncode};
use chest_form_proto::packets::{
    id, packet_name, BlockActorData, ContainerClose, ContainerOpen, UpdateBlock,
};
use chest_form_proto::types::BlockPos;
use tracing::trace;

use crate::config::FormConfig;
use crate::form::{ChestForm, ChestLayout};
use crate::host::{FormHost, PlayerId, PlayerLocation};
use crate::registry::PresentedForm;

/// Where to put the fake chest: `anchor_rise` blocks above the player, or
/// `anchor_drop` below when that would pass the dimension's build ceiling.
pub fn anchor_for(location: &PlayerLocation, config: &FormConfig) -> BlockPos {
    let feet = location.block_pos();
    let raised = feet.y + config.anchor_rise;
    if raised > location.dimension.build_ceiling() {
        feet.offset(0, -config.anchor_drop, 0)
    } else {
        feet.offset(0, config.anchor_rise, 0)
    }
}

/// Block entity NBT for chest `block` (0 or 1) of a form anchored at `anchor`.
pub fn chest_actor_nbt(form: &ChestForm, anchor: BlockPos, block: usize) -> NbtCompound {
    let pos = anchor.offset(block as i32, 0, 0);

    let mut nbt = NbtCompound::new();
    nbt.insert("CustomName".into(), form.title().into());
    nbt.insert("Findable".into(), false.into());
    nbt.insert("id".into(), "Chest".into());
    nbt.insert("isMovable".into(), true.into());
    nbt.insert("x".into(), NbtTag::Int(pos.x));
    nbt.insert("y".into(), NbtTag::Int(pos.y));
    nbt.insert("z".into(), NbtTag::Int(pos.z));

    if form.layout() == ChestLayout::Double {
        let lead = block == 0;
        let partner = if lead { anchor.offset(1, 0, 0) } else { anchor };
        nbt.insert("pairx".into(), NbtTag::Int(partner.x));
        nbt.insert("pairz".into(), NbtTag::Int(partner.z));
        nbt.insert("pairlead".into(), lead.into());
    }

    nbt.insert("Items".into(), form.block_items(block).into());
    nbt
}

/// Substitute chest blocks at the anchor and fill them with the form's items.
pub fn send_chest_blocks(
    host: &mut dyn FormHost,
    config: &FormConfig,
    player: PlayerId,
    presented: &PresentedForm,
) {
    let positions = presented.block_positions();
    for pos in &positions {
        let packet = UpdateBlock::new(*pos, config.chest_block_runtime_id);
        send(host, player, id::UPDATE_BLOCK, &packet);
    }
    for (block, pos) in positions.iter().enumerate() {
        let nbt = chest_actor_nbt(&presented.form, presented.anchor, block);
        let packet = BlockActorData::new(*pos, to_network_bytes(&nbt));
        send(host, player, id::BLOCK_ACTOR_DATA, &packet);
    }
}

pub fn send_container_open(
    host: &mut dyn FormHost,
    config: &FormConfig,
    player: PlayerId,
    anchor: BlockPos,
) {
    let packet = ContainerOpen::for_block(config.container_id, config.container_type, anchor);
    send(host, player, id::CONTAINER_OPEN, &packet);
}

/// Force the client to close the form window.
pub fn send_container_close(host: &mut dyn FormHost, config: &FormConfig, player: PlayerId) {
    let packet = ContainerClose {
        window_id: config.container_id,
        container_type: config.container_type,
        server_initiated: true,
    };
    send(host, player, id::CONTAINER_CLOSE, &packet);
}

/// Resend the chest positions. With `restore_real_block` the client gets the
/// blocks the world actually holds; otherwise the chest block again.
pub fn revert(
    host: &mut dyn FormHost,
    config: &FormConfig,
    player: PlayerId,
    presented: &PresentedForm,
    restore_real_block: bool,
) {
    for pos in presented.block_positions() {
        let runtime_id = if restore_real_block {
            host.block_runtime_id(presented.dimension, pos)
        } else {
            config.chest_block_runtime_id
        };
        send(host, player, id::UPDATE_BLOCK, &UpdateBlock::new(pos, runtime_id));
    }
}

fn send(host: &mut dyn FormHost, player: PlayerId, packet_id: u32, packet: &impl ProtoEncode) {
    trace!(
        "Sending {} (0x{packet_id:02X}) to {player}",
        packet_name(packet_id)
    );
    host.send_packet(player, packet_id, encode_packet(packet));
}
