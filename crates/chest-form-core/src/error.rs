//! Chest form errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("slot {slot} is outside a {size}-slot chest")]
    SlotOutOfRange { slot: usize, size: usize },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}
