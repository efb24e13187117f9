//! Monster preset files

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub width: f32,
    pub height: f32,
    pub sprite_sheet: String,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            width: 28.0,
            height: 28.0,
            sprite_sheet: "monsters/default.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub max_health: i32,
    pub movement_speed: f32,
    pub damage: i32,
    pub knockback_force: f32,
    pub attack_cooldown: f32,
    pub jump_force: f32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            movement_speed: 60.0,
            damage: 1,
            knockback_force: 160.0,
            attack_cooldown: 1.0,
            jump_force: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub patrol_range: f32,
    pub chase_range: f32,
    pub attack_range: f32,
    pub patrol_speed_multiplier: f32,
    pub chase_speed_multiplier: f32,
    pub can_jump: bool,
    pub can_fly: bool,
    pub can_climb: bool,
    pub idle_duration: f32,
    pub attack_duration: f32,
    pub hurt_duration: f32,
    pub death_duration: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            patrol_range: 96.0,
            chase_range: 160.0,
            attack_range: 32.0,
            patrol_speed_multiplier: 1.0,
            chase_speed_multiplier: 1.6,
            can_jump: false,
            can_fly: false,
            can_climb: false,
            idle_duration: 2.0,
            attack_duration: 0.5,
            hurt_duration: 0.3,
            death_duration: 1.0,
        }
    }
}

/// One data-driven transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub from_state: String,
    pub to_state: String,
    pub condition: String,
    #[serde(default)]
    pub condition_value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub initial_state: String,
    pub available_states: Vec<String>,
    pub transitions: Vec<TransitionConfig>,
    pub state_durations: BTreeMap<String, f32>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            initial_state: "idle".to_string(),
            available_states: ["idle", "patrol", "chase", "attack", "hurt", "death"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            transitions: Vec::new(),
            state_durations: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub attack: Option<String>,
    pub hurt: Option<String>,
    pub death: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterPreset {
    pub name: String,
    pub display_name: String,
    pub animation_preset: String,
    pub visual: VisualConfig,
    pub stats: StatsConfig,
    pub behavior: BehaviorConfig,
    pub state_config: StateConfig,
    pub audio: Option<AudioConfig>,
}

impl Default for MonsterPreset {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            display_name: "Monster".to_string(),
            animation_preset: "default".to_string(),
            visual: VisualConfig::default(),
            stats: StatsConfig::default(),
            behavior: BehaviorConfig::default(),
            state_config: StateConfig::default(),
            audio: None,
        }
    }
}

impl MonsterPreset {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Duration for a named state: `state_durations` wins over the
    /// behavior block
    pub fn state_duration(&self, state: &str) -> Option<f32> {
        if let Some(d) = self.state_config.state_durations.get(state) {
            return Some(*d);
        }
        let b = &self.behavior;
        match state {
            "idle" => Some(b.idle_duration),
            "attack" => Some(b.attack_duration),
            "hurt" => Some(b.hurt_duration),
            "death" => Some(b.death_duration),
            _ => None,
        }
    }
}

/// Presets indexed by name
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    presets: HashMap<String, MonsterPreset>,
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, preset: MonsterPreset) {
        self.presets.insert(preset.name.clone(), preset);
    }

    pub fn get(&self, name: &str) -> Result<&MonsterPreset> {
        self.presets
            .get(name)
            .ok_or_else(|| GameError::UnknownPreset(name.to_string()))
    }

    /// Preset by name, or the built-in defaults (logged) when missing
    pub fn get_or_default(&self, name: &str) -> MonsterPreset {
        match self.get(name) {
            Ok(preset) => preset.clone(),
            Err(e) => {
                log::error!("{e}; using built-in defaults");
                MonsterPreset {
                    name: name.to_string(),
                    ..MonsterPreset::default()
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Load every `*.json` file in a directory. Broken files are logged
    /// and skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut library = Self::new();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Cannot read preset directory {}: {}", dir.display(), e);
                return library;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match MonsterPreset::load(&path) {
                Ok(preset) => {
                    log::debug!("Loaded monster preset '{}'", preset.name);
                    library.insert(preset);
                }
                Err(e) => log::error!("Skipping preset {}: {}", path.display(), e),
            }
        }
        log::info!("Loaded {} monster presets from {}", library.len(), dir.display());
        library
    }
}
