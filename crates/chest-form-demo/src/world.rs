//! A one-player stand-in for a server: a flat world and a client that only
//! remembers which blocks it was told about.

use std::collections::HashMap;

use bytes::Bytes;
use chest_form_core::{Dimension, FormHost, PlayerId, PlayerLocation};
use chest_form_nbt::read_nbt_network;
use chest_form_proto::codec::ProtoDecode;
use chest_form_proto::packets::{id, packet_name, BlockActorData, ContainerOpen, UpdateBlock};
use chest_form_proto::types::BlockPos;
use tracing::{debug, info, warn};

/// Made-up runtime ids for the flat world.
pub const STONE_RUNTIME_ID: u32 = 0x2B6F_3A10;
pub const AIR_RUNTIME_ID: u32 = 0x5C1E_90D4;

/// Top of the stone layer.
const GROUND_LEVEL: i32 = 63;

pub struct SimulatedWorld {
    player: PlayerId,
    location: PlayerLocation,
    /// Blocks the client was told about, overriding the real world.
    client_view: HashMap<BlockPos, u32>,
    open_window: Option<u8>,
}

impl SimulatedWorld {
    pub fn new(player: PlayerId, location: PlayerLocation) -> Self {
        Self {
            player,
            location,
            client_view: HashMap::new(),
            open_window: None,
        }
    }

    fn real_block(pos: BlockPos) -> u32 {
        if pos.y <= GROUND_LEVEL {
            STONE_RUNTIME_ID
        } else {
            AIR_RUNTIME_ID
        }
    }

    /// Positions where the client sees something other than the world.
    pub fn ghost_blocks(&self) -> Vec<BlockPos> {
        self.client_view
            .iter()
            .filter(|(pos, rid)| Self::real_block(**pos) != **rid)
            .map(|(pos, _)| *pos)
            .collect()
    }

    pub fn open_window(&self) -> Option<u8> {
        self.open_window
    }

    fn on_client_packet(&mut self, packet_id: u32, payload: &[u8]) -> Result<(), String> {
        let mut buf = payload;
        match packet_id {
            id::UPDATE_BLOCK => {
                let packet = UpdateBlock::proto_decode(&mut buf).map_err(|e| e.to_string())?;
                debug!("Client block {} -> 0x{:08X}", packet.position, packet.runtime_id);
                self.client_view.insert(packet.position, packet.runtime_id);
            }
            id::BLOCK_ACTOR_DATA => {
                let packet = BlockActorData::proto_decode(&mut buf).map_err(|e| e.to_string())?;
                let root = read_nbt_network(&mut packet.nbt_data.as_slice())
                    .map_err(|e| e.to_string())?;
                let title = root
                    .compound
                    .get("CustomName")
                    .and_then(|t| t.as_string())
                    .unwrap_or("");
                let filled = root
                    .compound
                    .get("Items")
                    .and_then(|t| t.as_list())
                    .map(|items| {
                        items
                            .iter()
                            .filter(|i| i.as_compound().is_some_and(|c| !c.is_empty()))
                            .count()
                    })
                    .unwrap_or(0);
                debug!("Client chest at {} titled \"{title}\" with {filled} items", packet.position);
            }
            id::CONTAINER_OPEN => {
                let packet = ContainerOpen::proto_decode(&mut buf).map_err(|e| e.to_string())?;
                info!("Client opened window {} at {}", packet.window_id, packet.position);
                self.open_window = Some(packet.window_id);
            }
            id::CONTAINER_CLOSE => {
                info!("Client window closed by server");
                self.open_window = None;
            }
            _ => {}
        }
        Ok(())
    }
}

impl FormHost for SimulatedWorld {
    fn player_location(&self, player: PlayerId) -> Option<PlayerLocation> {
        (player == self.player).then_some(self.location)
    }

    fn block_runtime_id(&self, _dimension: Dimension, pos: BlockPos) -> u32 {
        Self::real_block(pos)
    }

    fn send_packet(&mut self, player: PlayerId, packet_id: u32, payload: Bytes) {
        if player != self.player {
            warn!("Dropping {} for unknown player {player}", packet_name(packet_id));
            return;
        }
        if let Err(e) = self.on_client_packet(packet_id, &payload) {
            warn!("Client rejected {}: {e}", packet_name(packet_id));
        }
    }
}
