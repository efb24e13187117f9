//! Game settings and tuning
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    /// Visible world width (also the horizontal world extent)
    pub game_width: f32,
    /// Visible world height
    pub game_height: f32,
    /// Camera scroll speed in world units per second (downward)
    pub scroll_speed: f32,

    // === Timing ===
    /// Minimum time between two physics ticks
    pub physics_interval: f32,
    /// Cap on the delta handed to one physics tick
    pub max_physics_delta: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub move_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub invincibility_duration: f32,
    pub knockback_force: f32,
    pub max_health: i32,
    pub lives: u8,

    // === Endless mode ===
    /// Number of pooled platforms kept alive
    pub platform_count: usize,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub platform_height: f32,
    /// Width of the wrap-around side border platforms
    pub border_width: f32,

    // === Scoring ===
    pub bonus_spawn_interval: f32,
    pub bonus_score: i32,
    pub monster_score: i32,
    pub spike_damage: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            scroll_speed: 40.0,

            physics_interval: PHYSICS_INTERVAL,
            max_physics_delta: MAX_PHYSICS_DELTA,

            player_width: 24.0,
            player_height: 32.0,
            move_speed: 180.0,
            jump_force: 420.0,
            gravity: 980.0,
            terminal_velocity: 600.0,
            dash_speed: 420.0,
            dash_duration: 0.2,
            dash_cooldown: 1.0,
            invincibility_duration: 1.0,
            knockback_force: 220.0,
            max_health: 3,
            lives: 3,

            platform_count: 8,
            platform_min_width: 64.0,
            platform_max_width: 160.0,
            platform_height: 16.0,
            border_width: 16.0,

            bonus_spawn_interval: 3.0,
            bonus_score: 10,
            monster_score: 50,
            spike_damage: 1,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, logging and falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "scroll_speed": 12.5, "lives": 1 }"#).unwrap();
        assert_eq!(s.scroll_speed, 12.5);
        assert_eq!(s.lives, 1);
        assert_eq!(s.game_width, GAME_WIDTH);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let s = Settings::load_or_default("/definitely/not/here/settings.json");
        assert_eq!(s, Settings::default());
    }
}
