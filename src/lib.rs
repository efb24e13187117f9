//! Up-Down Journey - a scrolling 2D platformer
//!
//! Core modules:
//! - `sim`: Simulation (actors, platform strategies, monster AI, collisions, game loop)
//! - `scene`: Scene and monster preset data files
//! - `render`: Draw-command sink used by actors and features
//! - `platform`: Input abstraction
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod platform;
pub mod render;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Edge length of one editor tile in world units
    pub const TILE_SIZE: f32 = 32.0;

    /// Minimum wall-clock time between two physics ticks (seconds)
    pub const PHYSICS_INTERVAL: f32 = 1.0 / 60.0;
    /// Largest delta a single physics tick may integrate
    pub const MAX_PHYSICS_DELTA: f32 = 0.05;

    /// Acceptable platform width range for size-oscillating platforms
    pub const MIN_PLATFORM_WIDTH: f32 = 5.0;
    pub const MAX_PLATFORM_WIDTH: f32 = 500.0;

    /// Default viewport
    pub const GAME_WIDTH: f32 = 640.0;
    pub const GAME_HEIGHT: f32 = 480.0;
}

/// Axis-aligned rectangle in world space (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Intersection rectangle, if the two rectangles overlap
    pub fn overlap(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Rect {
            x,
            y,
            width: self.right().min(other.right()) - x,
            height: self.bottom().min(other.bottom()) - y,
        })
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Same rectangle expressed relative to a viewport origin
    pub fn relative_to(&self, view: &Rect) -> Rect {
        Rect {
            x: self.x - view.x,
            y: self.y - view.y,
            ..*self
        }
    }
}

/// Convert editor tile coordinates into a world rectangle.
///
/// Width and height are tile counts and may be fractional.
#[inline]
pub fn tile_to_world_rect(tile_x: i32, tile_y: i32, width: f32, height: f32) -> Rect {
    use consts::TILE_SIZE;
    Rect::new(
        tile_x as f32 * TILE_SIZE,
        tile_y as f32 * TILE_SIZE,
        width * TILE_SIZE,
        height * TILE_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_extent() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(8.0, 2.0, 10.0, 10.0);
        let o = a.overlap(&b).unwrap();
        assert_eq!(o, Rect::new(8.0, 2.0, 2.0, 8.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.overlap(&b).is_none());
    }

    #[test]
    fn test_tile_to_world() {
        assert_eq!(
            tile_to_world_rect(2, -3, 1.5, 0.5),
            Rect::new(64.0, -96.0, 48.0, 16.0)
        );
    }

    proptest! {
        #[test]
        fn tile_conversion_scales_by_tile_size(
            tx in -10_000i32..10_000,
            ty in -10_000i32..10_000,
            w in 0.0f32..100.0,
            h in 0.0f32..100.0,
        ) {
            let r = tile_to_world_rect(tx, ty, w, h);
            prop_assert_eq!(r, Rect::new(tx as f32 * 32.0, ty as f32 * 32.0, w * 32.0, h * 32.0));
        }

        #[test]
        fn tile_conversion_is_linear(tx in -1_000i32..1_000, ty in -1_000i32..1_000, k in -8i32..8) {
            let base = tile_to_world_rect(tx, ty, 1.0, 1.0);
            let scaled = tile_to_world_rect(tx * k, ty * k, 1.0, 1.0);
            prop_assert_eq!(scaled.x, base.x * k as f32);
            prop_assert_eq!(scaled.y, base.y * k as f32);
        }
    }
}
