//! Which form each player currently has open.

use std::collections::HashMap;
use std::sync::Arc;

use chest_form_proto::types::BlockPos;

use crate::form::ChestForm;
use crate::host::{Dimension, PlayerId};

/// A form as shown to one player: where the fake chest stands and in which
/// dimension, so the real blocks can be restored.
#[derive(Debug, Clone)]
pub struct PresentedForm {
    pub form: Arc<ChestForm>,
    pub anchor: BlockPos,
    pub dimension: Dimension,
}

impl PresentedForm {
    /// Positions of the chest blocks, first chest first.
    pub fn block_positions(&self) -> Vec<BlockPos> {
        (0..self.form.layout().block_count())
            .map(|i| self.anchor.offset(i as i32, 0, 0))
            .collect()
    }
}

/// At most one presented form per player.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<PlayerId, PresentedForm>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `presented` for `player`, returning the entry it replaced.
    pub fn insert(&mut self, player: PlayerId, presented: PresentedForm) -> Option<PresentedForm> {
        self.sessions.insert(player, presented)
    }

    pub fn remove(&mut self, player: &PlayerId) -> Option<PresentedForm> {
        self.sessions.remove(player)
    }

    pub fn get(&self, player: &PlayerId) -> Option<&PresentedForm> {
        self.sessions.get(player)
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.sessions.contains_key(player)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
