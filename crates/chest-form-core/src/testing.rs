//! In-memory [`FormHost`] that records every packet it is asked to send.

use std::collections::HashMap;

use bytes::Bytes;
use chest_form_proto::codec::ProtoDecode;
use chest_form_proto::types::{BlockPos, Vec3};

use crate::host::{Dimension, FormHost, PlayerId, PlayerLocation};

/// Runtime id reported for positions nobody set.
pub const AIR_RUNTIME_ID: u32 = 0x0A1B_2C3D;

#[derive(Debug, Default)]
pub struct RecordingHost {
    players: HashMap<PlayerId, PlayerLocation>,
    blocks: HashMap<(Dimension, BlockPos), u32>,
    sent: Vec<(PlayerId, u32, Bytes)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place_player(&mut self, player: PlayerId, x: f32, y: f32, z: f32, dimension: Dimension) {
        self.players
            .insert(player, PlayerLocation::new(Vec3::new(x, y, z), dimension));
    }

    pub fn set_block(&mut self, dimension: Dimension, pos: BlockPos, runtime_id: u32) {
        self.blocks.insert((dimension, pos), runtime_id);
    }

    /// Packet ids sent to `player`, in order.
    pub fn sent_ids(&self, player: PlayerId) -> Vec<u32> {
        self.sent_to(player).map(|(id, _)| id).collect()
    }

    pub fn payload(&self, player: PlayerId, index: usize) -> Bytes {
        self.sent_to(player)
            .nth(index)
            .map(|(_, body)| body)
            .unwrap_or_else(|| panic!("no packet #{index} for {player}"))
    }

    /// Decode the `index`-th packet sent to `player`.
    pub fn decode<T: ProtoDecode>(&self, player: PlayerId, index: usize) -> T {
        let body = self.payload(player, index);
        T::proto_decode(&mut body.as_ref()).unwrap()
    }

    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }

    pub fn total_sent(&self) -> usize {
        self.sent.len()
    }

    fn sent_to(&self, player: PlayerId) -> impl Iterator<Item = (u32, Bytes)> + '_ {
        self.sent
            .iter()
            .filter(move |(p, _, _)| *p == player)
            .map(|(_, id, body)| (*id, body.clone()))
    }
}

impl FormHost for RecordingHost {
    fn player_location(&self, player: PlayerId) -> Option<PlayerLocation> {
        self.players.get(&player).copied()
    }

    fn block_runtime_id(&self, dimension: Dimension, pos: BlockPos) -> u32 {
        self.blocks
            .get(&(dimension, pos))
            .copied()
            .unwrap_or(AIR_RUNTIME_ID)
    }

    fn send_packet(&mut self, player: PlayerId, packet_id: u32, payload: Bytes) {
        self.sent.push((player, packet_id, payload));
    }
}
