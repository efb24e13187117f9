//! Draw-command sink
//!
//! The simulation never talks to a graphics API. Actors and features emit
//! screen-space primitives into a [`Canvas`]; a backend (or the recording
//! [`DrawList`]) decides what to do with them.

use serde::{Deserialize, Serialize};

use crate::Rect;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const DARK_GRAY: Color = Color::rgb(80, 80, 80);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GOLD: Color = Color::rgb(255, 203, 0);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const SKY: Color = Color::rgb(102, 191, 255);
    pub const PURPLE: Color = Color::rgb(200, 122, 255);

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Sprite reference: sheet name + frame index
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub sheet: String,
    pub frame: u32,
    pub flip_x: bool,
}

/// Target for all drawing done by the simulation
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color);
    fn sprite(&mut self, rect: Rect, sprite: SpriteFrame, tint: Color);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { rect: Rect, color: Color },
    Outline { rect: Rect, thickness: f32, color: Color },
    Sprite { rect: Rect, sprite: SpriteFrame, tint: Color },
}

/// Canvas that just records commands (headless runs, tests)
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::Outline {
            rect,
            thickness,
            color,
        });
    }

    fn sprite(&mut self, rect: Rect, sprite: SpriteFrame, tint: Color) {
        self.commands.push(DrawCommand::Sprite { rect, sprite, tint });
    }
}
