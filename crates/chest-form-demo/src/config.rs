use serde::Deserialize;
use std::path::Path;

use chest_form_core::{Dimension, FormConfig};

#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    pub logging: LoggingSection,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub player: PlayerSection,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

/// Where the simulated player stands.
#[derive(Debug, Deserialize)]
pub struct PlayerSection {
    #[serde(default = "default_player_name")]
    pub name: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default = "default_player_y")]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default = "default_dimension")]
    pub dimension: Dimension,
}

fn default_player_name() -> String {
    "Steve".into()
}

fn default_player_y() -> f32 {
    64.0
}

fn default_dimension() -> Dimension {
    Dimension::Overworld
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            name: default_player_name(),
            x: 0.0,
            y: default_player_y(),
            z: 0.0,
            dimension: default_dimension(),
        }
    }
}

impl DemoConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
