//! Rectangle collision resolution
//!
//! Movers (player, monsters) are pushed out of solid platforms along the
//! axis of least penetration. Grounding is recomputed from scratch on
//! every pass.

use glam::Vec2;

use crate::Rect;

/// Axis along which a separation was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Result of separating one mover from one opponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub axis: Axis,
    /// Displacement to apply to the mover
    pub offset: Vec2,
    /// Mover's top edge was above the opponent's top edge at overlap time
    pub grounded: bool,
}

/// Compute the push-out for `mover` against `opponent`, if they overlap.
///
/// Smaller overlap extent wins (ties resolve vertically). The mover is
/// pushed away from the opponent based on their x (or y) ordering.
pub fn separate(mover: &Rect, opponent: &Rect) -> Option<Separation> {
    let overlap = mover.overlap(opponent)?;
    let grounded = mover.y < opponent.y;

    let (axis, offset) = if overlap.width < overlap.height {
        let dx = if mover.x < opponent.x {
            -overlap.width
        } else {
            overlap.width
        };
        (Axis::Horizontal, Vec2::new(dx, 0.0))
    } else {
        let dy = if mover.y < opponent.y {
            -overlap.height
        } else {
            overlap.height
        };
        (Axis::Vertical, Vec2::new(0.0, dy))
    };

    Some(Separation {
        axis,
        offset,
        grounded,
    })
}

/// Snapshot of a solid platform taken before the collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    /// Index of the platform in the actor list
    pub index: usize,
    pub rect: Rect,
    /// Platform displacement during this tick
    pub delta_x: f32,
}

/// Everything a mover learned from one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    pub grounded: bool,
    /// Horizontal motion of the platform the mover stands on
    pub ride_delta_x: f32,
    /// Pushed sideways by at least one solid
    pub blocked_x: bool,
    /// Indices of every solid touched
    pub touched: Vec<usize>,
}

/// Resolve `rect` against every solid in order, adjusting velocity so the
/// mover stops moving into what it hit.
pub fn resolve_against(rect: &mut Rect, velocity: &mut Vec2, solids: &[Solid]) -> Contacts {
    let mut contacts = Contacts::default();

    for solid in solids {
        let Some(sep) = separate(rect, &solid.rect) else {
            continue;
        };
        contacts.touched.push(solid.index);

        if sep.grounded {
            contacts.grounded = true;
            contacts.ride_delta_x = solid.delta_x;
        }

        rect.translate(sep.offset.x, sep.offset.y);
        match sep.axis {
            Axis::Horizontal => {
                contacts.blocked_x = true;
                if velocity.x * sep.offset.x < 0.0 {
                    velocity.x = 0.0;
                }
            }
            Axis::Vertical => {
                if velocity.y * sep.offset.y < 0.0 {
                    velocity.y = 0.0;
                }
            }
        }
    }

    contacts
}
