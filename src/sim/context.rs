//! Explicit simulation context
//!
//! Everything an actor may need from its owning game during a tick: the
//! camera, the world bounds, the shared RNG, the checkpoint slot and the
//! event outbox. Owned by [`Game`](super::Game) and lent out by `&mut`.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bounds::WorldBounds;
use super::events::GameEvent;
use crate::{Rect, Settings};

pub struct WorldContext {
    /// Visible viewport in world coordinates
    pub camera: Rect,
    /// Horizontal play area (y is unbounded while scrolling)
    pub bounds: WorldBounds,
    /// Shared RNG, seeded once per game
    pub rng: Pcg32,
    pub seed: u64,
    /// Latest checkpoint position (player respawn point)
    pub checkpoint: Option<(f32, f32)>,
    /// Events raised during the current frame
    pub outbox: Vec<GameEvent>,
    /// Camera scrolls on its own (endless mode); being left above it kills
    pub scrolling: bool,
    /// Fixed fall-death plane for authored scenes; `None` uses the view bottom
    pub kill_y: Option<f32>,
    pub settings: Settings,
}

impl WorldContext {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let camera = Rect::new(0.0, 0.0, settings.game_width, settings.game_height);
        Self {
            camera,
            bounds: WorldBounds::new(Rect::new(
                0.0,
                f32::MIN / 4.0,
                settings.game_width,
                f32::MAX / 2.0,
            )),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            checkpoint: None,
            outbox: Vec::new(),
            scrolling: false,
            kill_y: None,
            settings,
        }
    }

    /// Seed derived from the wall clock, for real runs
    pub fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.outbox.push(event);
    }

    /// Called by checkpoint features when the player touches them
    pub fn on_checkpoint_reached(&mut self, x: f32, y: f32) {
        if self.checkpoint == Some((x, y)) {
            return;
        }
        log::info!("Checkpoint reached at ({x:.0}, {y:.0})");
        self.checkpoint = Some((x, y));
        self.emit(GameEvent::CheckpointReached { x, y });
    }

    /// Top edge of the visible world
    pub fn view_top(&self) -> f32 {
        self.camera.y
    }

    pub fn view_bottom(&self) -> f32 {
        self.camera.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_emits_once() {
        let mut ctx = WorldContext::new(Settings::default(), 1);
        ctx.on_checkpoint_reached(10.0, 20.0);
        ctx.on_checkpoint_reached(10.0, 20.0);
        assert_eq!(ctx.checkpoint, Some((10.0, 20.0)));
        assert_eq!(ctx.outbox.len(), 1);
    }
}
