//! Sprite animation controller shared by the player and monsters

use std::collections::HashMap;

/// Named animation clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    Dash,
    Attack,
    Hurt,
    Death,
}

/// Frame layout of one clip on a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    /// First frame index on the sheet
    pub first_frame: u32,
    pub frame_count: u32,
    pub fps: f32,
    pub looping: bool,
}

impl Clip {
    pub fn new(first_frame: u32, frame_count: u32, fps: f32, looping: bool) -> Self {
        Self {
            first_frame,
            frame_count: frame_count.max(1),
            fps,
            looping,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnimationController {
    clips: HashMap<AnimationKind, Clip>,
    current: AnimationKind,
    frame: u32,
    elapsed: f32,
    finished: bool,
}

impl AnimationController {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            current: AnimationKind::Idle,
            frame: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Controller with one row per clip, `frames` frames each, laid out
    /// in declaration order. Matches the stock character sheets.
    pub fn with_rows(frames: u32, fps: f32) -> Self {
        use AnimationKind::*;
        let mut controller = Self::new();
        for (row, kind) in [Idle, Walk, Run, Jump, Fall, Dash, Attack, Hurt, Death]
            .into_iter()
            .enumerate()
        {
            let looping = !matches!(kind, Attack | Hurt | Death);
            controller.add_clip(kind, Clip::new(row as u32 * frames, frames, fps, looping));
        }
        controller
    }

    pub fn add_clip(&mut self, kind: AnimationKind, clip: Clip) {
        self.clips.insert(kind, clip);
    }

    pub fn current(&self) -> AnimationKind {
        self.current
    }

    /// Switch clips. Restarts only when the clip actually changes.
    pub fn play(&mut self, kind: AnimationKind) {
        if kind == self.current {
            return;
        }
        self.current = kind;
        self.frame = 0;
        self.elapsed = 0.0;
        self.finished = false;
    }

    pub fn update(&mut self, dt: f32) {
        let Some(clip) = self.clips.get(&self.current) else {
            return;
        };
        if self.finished || clip.fps <= 0.0 {
            return;
        }

        self.elapsed += dt;
        let frame_time = 1.0 / clip.fps;
        while self.elapsed >= frame_time {
            self.elapsed -= frame_time;
            if self.frame + 1 < clip.frame_count {
                self.frame += 1;
            } else if clip.looping {
                self.frame = 0;
            } else {
                self.finished = true;
                break;
            }
        }
    }

    /// Index of the current frame within the clip
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Absolute frame index on the sprite sheet
    pub fn sheet_frame(&self) -> u32 {
        self.clips
            .get(&self.current)
            .map(|c| c.first_frame + self.frame)
            .unwrap_or(0)
    }

    /// A non-looping clip reached its last frame
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new()
    }
}
