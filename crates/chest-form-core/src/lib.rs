//! Chest forms: clickable menus shown through a client-side fake chest.
//!
//! A [`ChestForm`] is built once and can be presented to any number of
//! players. The [`ChestFormManager`] places a chest above the player,
//! opens it, and watches inbound packets for a take from a clickable slot.
//! The chest exists only on that player's client and is reverted to the
//! real world blocks as soon as the form resolves.

pub mod config;
pub mod enchantment;
pub mod error;
pub mod form;
pub mod host;
pub mod item;
pub mod manager;
pub mod presenter;
pub mod registry;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use config::FormConfig;
pub use error::FormError;
pub use form::{ChestForm, ChestLayout, SlotHandler};
pub use host::{Dimension, FormHost, PlayerId, PlayerLocation};
pub use item::SlotItem;
pub use manager::{ChestFormManager, PacketOutcome};
