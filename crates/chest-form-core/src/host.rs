//! The seam between chest forms and the server that owns the players.
//!
//! Forms never touch the network or the world directly. Everything they need
//! (where a player stands, what block really sits at a position, a way to push
//! a packet) comes through [`FormHost`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use chest_form_proto::types::{BlockPos, Uuid, Vec3};

/// Stable player identity (the player's UUID).
pub type PlayerId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Overworld,
    Nether,
    TheEnd,
}

impl Dimension {
    /// Highest buildable y coordinate.
    pub fn build_ceiling(self) -> i32 {
        match self {
            Dimension::Overworld => 319,
            Dimension::Nether => 127,
            Dimension::TheEnd => 255,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerLocation {
    pub position: Vec3,
    pub dimension: Dimension,
}

impl PlayerLocation {
    pub fn new(position: Vec3, dimension: Dimension) -> Self {
        Self {
            position,
            dimension,
        }
    }

    /// The block the player's feet are in.
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::from_vec3(&self.position)
    }
}

/// Server services a chest form needs.
pub trait FormHost {
    /// Current location of an online player, `None` if unknown.
    fn player_location(&self, player: PlayerId) -> Option<PlayerLocation>;

    /// Runtime id of the block actually stored in the world at `pos`.
    fn block_runtime_id(&self, dimension: Dimension, pos: BlockPos) -> u32;

    /// Deliver one packet body to a single player.
    fn send_packet(&mut self, player: PlayerId, packet_id: u32, payload: Bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceilings() {
        assert_eq!(Dimension::Overworld.build_ceiling(), 319);
        assert_eq!(Dimension::Nether.build_ceiling(), 127);
        assert_eq!(Dimension::TheEnd.build_ceiling(), 255);
    }

    #[test]
    fn block_pos_floors_negative_coordinates() {
        let loc = PlayerLocation::new(Vec3::new(-0.5, 64.9, 10.2), Dimension::Overworld);
        assert_eq!(loc.block_pos(), BlockPos::new(-1, 64, 10));
    }
}
