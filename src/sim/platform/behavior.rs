//! Per-frame platform motion policies
//!
//! Each strategy captures its reference frame from the platform rectangle
//! on the first update, then mutates the rectangle in place every tick.
//! Every strategy retires its platform once it has scrolled completely
//! above the camera's top edge.

use std::collections::BTreeMap;

use crate::consts::{MAX_PLATFORM_WIDTH, MIN_PLATFORM_WIDTH};
use crate::sim::actor::{ActorBody, ActorState};
use crate::Rect;

/// Behavior identifiers as written in scene files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BehaviorKind {
    #[default]
    Static,
    Horizontal,
    EightTurn,
    OscillatingSize,
}

impl BehaviorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorKind::Static => "static",
            BehaviorKind::Horizontal => "horizontal",
            BehaviorKind::EightTurn => "eight_turn",
            BehaviorKind::OscillatingSize => "oscillating_size",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "static" => Some(BehaviorKind::Static),
            "horizontal" => Some(BehaviorKind::Horizontal),
            "eight_turn" | "eight_turn_horizontal" => Some(BehaviorKind::EightTurn),
            "oscillating_size" => Some(BehaviorKind::OscillatingSize),
            _ => None,
        }
    }

    /// Parse, logging and defaulting to `static` for unknown names
    pub fn parse_or_static(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown platform behavior '{s}', using static");
            BehaviorKind::Static
        })
    }

    /// Build the strategy, reading tunables from `params` (missing keys use defaults)
    pub fn build(&self, params: &BTreeMap<String, f32>) -> Box<dyn BehaviorStrategy> {
        let get = |key: &str, default: f32| params.get(key).copied().unwrap_or(default);
        match self {
            BehaviorKind::Static => Box::new(StaticBehavior),
            BehaviorKind::Horizontal => Box::new(HorizontalBehavior::new(
                get("speed_x", 80.0),
                get("max_offset", 96.0),
            )),
            BehaviorKind::EightTurn => Box::new(EightTurnBehavior::new(
                get("speed", 1.0),
                get("amplitude", 48.0),
            )),
            BehaviorKind::OscillatingSize => Box::new(OscillatingSizeBehavior::new(
                get("speed", 30.0),
                get("min_offset", -32.0),
                get("max_offset", 32.0),
            )),
        }
    }
}

/// Motion policy owned by a platform
pub trait BehaviorStrategy {
    fn kind(&self) -> BehaviorKind;

    /// Advance one tick. `view` is the camera rectangle.
    fn update(&mut self, body: &mut ActorBody, view: &Rect, dt: f32);
}

/// Mark the platform consumed once it is fully above the viewport
fn retire_if_above(body: &mut ActorBody, view: &Rect) {
    if body.rect.bottom() < view.y {
        body.state = ActorState::Consumed;
    }
}

/// No movement
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBehavior;

impl BehaviorStrategy for StaticBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Static
    }

    fn update(&mut self, body: &mut ActorBody, view: &Rect, _dt: f32) {
        retire_if_above(body, view);
    }
}

/// Ping-pong between `pivot_x - max_offset` and `pivot_x + max_offset`.
///
/// The direction flips once a bound is reached; the overshoot of that
/// tick is kept.
#[derive(Debug, Clone)]
pub struct HorizontalBehavior {
    speed_x: f32,
    max_offset: f32,
    pivot_x: Option<f32>,
    direction: f32,
}

impl HorizontalBehavior {
    pub fn new(speed_x: f32, max_offset: f32) -> Self {
        Self {
            speed_x,
            max_offset: max_offset.abs(),
            pivot_x: None,
            direction: 1.0,
        }
    }
}

impl BehaviorStrategy for HorizontalBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Horizontal
    }

    fn update(&mut self, body: &mut ActorBody, view: &Rect, dt: f32) {
        let pivot = *self.pivot_x.get_or_insert(body.rect.x);

        body.rect.x += self.direction * self.speed_x * dt;
        if body.rect.x >= pivot + self.max_offset || body.rect.x <= pivot - self.max_offset {
            self.direction = -self.direction;
        }

        retire_if_above(body, view);
    }
}

/// Figure-eight path around the starting position.
///
/// The phase advances by `2 * speed * dt` per tick. The platform is moved
/// by the difference to the previous offset, not placed absolutely.
#[derive(Debug, Clone)]
pub struct EightTurnBehavior {
    speed: f32,
    amplitude: f32,
    frame: Option<EightFrame>,
}

#[derive(Debug, Clone, Copy)]
struct EightFrame {
    t: f32,
    prev_x: f32,
    prev_y: f32,
}

impl EightTurnBehavior {
    pub fn new(speed: f32, amplitude: f32) -> Self {
        Self {
            speed,
            amplitude,
            frame: None,
        }
    }

    /// Offset from the start position at phase `t`
    pub fn offset_at(&self, t: f32) -> (f32, f32) {
        let s = t.sin();
        (self.amplitude * s * t.cos() / 2.0, self.amplitude * s)
    }
}

impl BehaviorStrategy for EightTurnBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::EightTurn
    }

    fn update(&mut self, body: &mut ActorBody, view: &Rect, dt: f32) {
        let mut frame = self.frame.unwrap_or(EightFrame {
            t: 0.0,
            prev_x: 0.0,
            prev_y: 0.0,
        });

        frame.t += self.speed * dt;
        frame.t += self.speed * dt;
        let (x_offset, y_offset) = self.offset_at(frame.t);

        body.rect.x += x_offset - frame.prev_x;
        body.rect.y += y_offset - frame.prev_y;
        frame.prev_x = x_offset;
        frame.prev_y = y_offset;
        self.frame = Some(frame);

        retire_if_above(body, view);
    }
}

/// Width grows and shrinks around a fixed center x
#[derive(Debug, Clone)]
pub struct OscillatingSizeBehavior {
    speed: f32,
    min_offset: f32,
    max_offset: f32,
    frame: Option<SizeFrame>,
}

#[derive(Debug, Clone, Copy)]
struct SizeFrame {
    center_x: f32,
    min_width: f32,
    max_width: f32,
    growing: bool,
}

impl OscillatingSizeBehavior {
    pub fn new(speed: f32, min_offset: f32, max_offset: f32) -> Self {
        Self {
            speed: speed.abs(),
            min_offset,
            max_offset,
            frame: None,
        }
    }

    /// Width range for a platform of `original_width`, clamped to the
    /// acceptable global range
    pub fn width_bounds(&self, original_width: f32) -> (f32, f32) {
        let a = (original_width + self.min_offset).clamp(MIN_PLATFORM_WIDTH, MAX_PLATFORM_WIDTH);
        let b = (original_width + self.max_offset).clamp(MIN_PLATFORM_WIDTH, MAX_PLATFORM_WIDTH);
        (a.min(b), a.max(b))
    }
}

impl BehaviorStrategy for OscillatingSizeBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::OscillatingSize
    }

    fn update(&mut self, body: &mut ActorBody, view: &Rect, dt: f32) {
        let mut frame = match self.frame {
            Some(frame) => frame,
            None => {
                let (min_width, max_width) = self.width_bounds(body.rect.width);
                let center_x = body.rect.x + body.rect.width / 2.0;
                body.rect.width = body.rect.width.clamp(min_width, max_width);
                body.rect.x = center_x - body.rect.width / 2.0;
                SizeFrame {
                    center_x,
                    min_width,
                    max_width,
                    growing: true,
                }
            }
        };

        let delta_x = if frame.growing {
            self.speed * dt
        } else {
            -self.speed * dt
        };
        body.rect.width += 2.0 * delta_x;
        body.rect.x -= delta_x;

        if body.rect.width >= frame.max_width {
            body.rect.width = frame.max_width;
            frame.growing = false;
        } else if body.rect.width <= frame.min_width {
            body.rect.width = frame.min_width;
            frame.growing = true;
        }
        body.rect.x = frame.center_x - body.rect.width / 2.0;
        self.frame = Some(frame);

        retire_if_above(body, view);
    }
}
