//! Tunables for the chest illusion: reserved ids, delays and anchor offsets.

use std::path::Path;

use serde::Deserialize;

use crate::error::FormError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormConfig {
    /// Window id reserved for chest forms; close packets with any other id
    /// belong to someone else.
    #[serde(default = "default_container_id")]
    pub container_id: u8,
    #[serde(default)]
    pub container_type: u8,
    /// Hashed block runtime id of `minecraft:chest`.
    #[serde(default = "default_chest_block_runtime_id")]
    pub chest_block_runtime_id: u32,
    /// Ticks between the block packets and ContainerOpen.
    #[serde(default = "default_open_delay_ticks")]
    pub open_delay_ticks: u64,
    /// Ticks between teardown and the slot callback.
    #[serde(default = "default_callback_delay_ticks")]
    pub callback_delay_ticks: u64,
    #[serde(default = "default_anchor_rise")]
    pub anchor_rise: i32,
    #[serde(default = "default_anchor_drop")]
    pub anchor_drop: i32,
}

fn default_container_id() -> u8 {
    114
}

fn default_chest_block_runtime_id() -> u32 {
    741_882_976
}

fn default_open_delay_ticks() -> u64 {
    10
}

fn default_callback_delay_ticks() -> u64 {
    2
}

fn default_anchor_rise() -> i32 {
    4
}

fn default_anchor_drop() -> i32 {
    3
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            container_type: 0,
            chest_block_runtime_id: default_chest_block_runtime_id(),
            open_delay_ticks: default_open_delay_ticks(),
            callback_delay_ticks: default_callback_delay_ticks(),
            anchor_rise: default_anchor_rise(),
            anchor_drop: default_anchor_drop(),
        }
    }
}

impl FormConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FormError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, FormError> {
        Ok(toml::from_str(contents)?)
    }
}
