//! Scene files
//!
//! Flat JSON documents produced by the level editor. Coordinates are tile
//! indices; see [`tile_to_world_rect`](crate::tile_to_world_rect).

pub mod preset;

pub use preset::{MonsterPreset, PresetLibrary};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Player start position in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSpawnData {
    pub x: i32,
    pub y: i32,
}

/// One authored platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformData {
    pub x: i32,
    pub y: i32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_behavior")]
    pub behavior: String,
    #[serde(default)]
    pub behavior_params: BTreeMap<String, f32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub feature_params: BTreeMap<String, f32>,
}

fn default_behavior() -> String {
    "static".to_string()
}

/// Monster placement referencing a preset by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSpawnData {
    pub x: i32,
    pub y: i32,
    pub preset_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player_spawn: PlayerSpawnData,
    #[serde(default)]
    pub platforms: Vec<PlatformData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monsters: Vec<MonsterSpawnData>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a scene; a missing or corrupt file yields an empty scene
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(scene) => {
                log::info!(
                    "Loaded scene '{}' ({} platforms, {} monsters)",
                    scene.name,
                    scene.platforms.len(),
                    scene.monsters.len()
                );
                scene
            }
            Err(e) => {
                log::error!("Failed to load scene {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
