//! Add-on platform features (spikes, checkpoints)
//!
//! Features are drawn after their platform and receive collision callbacks
//! from the game's collision pass. They never register for events on
//! their own.

use std::collections::BTreeMap;

use crate::render::{Canvas, Color};
use crate::sim::actor::{Combatant, GroupId};
use crate::sim::context::WorldContext;
use crate::Rect;

/// Feature type tag. A platform holds at most one feature per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FeatureKind {
    Spikes = 1,
    Checkpoint = 2,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Spikes => "spikes",
            FeatureKind::Checkpoint => "checkpoint",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spikes" => Some(FeatureKind::Spikes),
            "checkpoint" => Some(FeatureKind::Checkpoint),
            _ => None,
        }
    }

    /// Build a feature. Recognised params: `spikes_damage`.
    pub fn build(&self, params: &BTreeMap<String, f32>, default_damage: i32) -> Box<dyn Feature> {
        match self {
            FeatureKind::Spikes => {
                let damage = params
                    .get("spikes_damage")
                    .map(|d| d.round() as i32)
                    .unwrap_or(default_damage);
                Box::new(Spikes::new(damage))
            }
            FeatureKind::Checkpoint => Box::new(Checkpoint),
        }
    }
}

pub trait Feature {
    fn kind(&self) -> FeatureKind;

    /// Draw on top of the platform. `screen_rect` is already camera-relative.
    fn draw(&self, screen_rect: &Rect, canvas: &mut dyn Canvas);

    /// Called by the collision pass when `actor` touches the platform
    fn handle_collision(&self, platform: &Rect, actor: &mut dyn Combatant, ctx: &mut WorldContext);
}

/// Row of spikes on the platform's top edge. The player takes the full
/// damage, anything else one point.
#[derive(Debug, Clone, Copy)]
pub struct Spikes {
    pub damage: i32,
}

impl Spikes {
    const TOOTH_WIDTH: f32 = 8.0;
    const TOOTH_HEIGHT: f32 = 6.0;

    pub fn new(damage: i32) -> Self {
        Self { damage }
    }
}

impl Feature for Spikes {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Spikes
    }

    fn draw(&self, screen_rect: &Rect, canvas: &mut dyn Canvas) {
        let teeth = (screen_rect.width / Self::TOOTH_WIDTH).floor().max(1.0) as u32;
        let step = screen_rect.width / teeth as f32;
        for i in 0..teeth {
            // Two stacked slabs approximate a triangle
            let x = screen_rect.x + i as f32 * step;
            let base_y = screen_rect.y - Self::TOOTH_HEIGHT / 2.0;
            canvas.fill_rect(
                Rect::new(x, base_y, step * 0.8, Self::TOOTH_HEIGHT / 2.0),
                Color::GRAY,
            );
            canvas.fill_rect(
                Rect::new(x + step * 0.25, screen_rect.y - Self::TOOTH_HEIGHT, step * 0.3, Self::TOOTH_HEIGHT / 2.0),
                Color::WHITE,
            );
        }
    }

    fn handle_collision(&self, platform: &Rect, actor: &mut dyn Combatant, ctx: &mut WorldContext) {
        if self.damage <= 0 {
            return;
        }
        let amount = if actor.group_id() == GroupId::Player { self.damage } else { 1 };
        actor.take_damage(amount, platform, ctx);
    }
}

/// Respawn marker; reports its position when the player touches it
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkpoint;

impl Checkpoint {
    /// Respawn point: horizontally centered, on top of the platform
    pub fn anchor(platform: &Rect) -> (f32, f32) {
        (platform.x + platform.width / 2.0, platform.y)
    }
}

impl Feature for Checkpoint {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Checkpoint
    }

    fn draw(&self, screen_rect: &Rect, canvas: &mut dyn Canvas) {
        let pole_x = screen_rect.x + screen_rect.width / 2.0;
        canvas.fill_rect(Rect::new(pole_x - 1.0, screen_rect.y - 24.0, 2.0, 24.0), Color::WHITE);
        canvas.fill_rect(Rect::new(pole_x + 1.0, screen_rect.y - 24.0, 12.0, 8.0), Color::GREEN);
    }

    fn handle_collision(&self, platform: &Rect, actor: &mut dyn Combatant, ctx: &mut WorldContext) {
        if actor.group_id() != GroupId::Player {
            return;
        }
        let (x, y) = Self::anchor(platform);
        ctx.on_checkpoint_reached(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;
    use crate::sim::actor::{Actor, ActorBody};
    use crate::Settings;

    struct Target {
        body: ActorBody,
        group: GroupId,
        damage_taken: i32,
    }

    impl Target {
        fn new(group: GroupId) -> Self {
            Self {
                body: ActorBody::new(Rect::new(0.0, 0.0, 10.0, 10.0)),
                group,
                damage_taken: 0,
            }
        }
    }

    impl Actor for Target {
        fn body(&self) -> &ActorBody {
            &self.body
        }
        fn body_mut(&mut self) -> &mut ActorBody {
            &mut self.body
        }
        fn group_id(&self) -> GroupId {
            self.group
        }
    }

    impl Combatant for Target {
        fn take_damage(&mut self, amount: i32, _source: &Rect, _ctx: &mut WorldContext) {
            self.damage_taken += amount;
        }
    }

    #[test]
    fn test_checkpoint_reports_to_context() {
        let mut ctx = WorldContext::new(Settings::default(), 1);
        let platform = Rect::new(100.0, 200.0, 64.0, 16.0);

        let mut monster = Target::new(GroupId::Pickup);
        Checkpoint.handle_collision(&platform, &mut monster, &mut ctx);
        assert_eq!(ctx.checkpoint, None);

        let mut player = Target::new(GroupId::Player);
        Checkpoint.handle_collision(&platform, &mut player, &mut ctx);
        assert_eq!(ctx.checkpoint, Some((132.0, 200.0)));
    }

    #[test]
    fn test_spikes_damage() {
        let mut ctx = WorldContext::new(Settings::default(), 1);
        let platform = Rect::new(0.0, 0.0, 64.0, 16.0);
        let mut player = Target::new(GroupId::Player);
        Spikes::new(2).handle_collision(&platform, &mut player, &mut ctx);
        assert_eq!(player.damage_taken, 2);

        let mut monster = Target::new(GroupId::Pickup);
        Spikes::new(2).handle_collision(&platform, &mut monster, &mut ctx);
        assert_eq!(monster.damage_taken, 1);
    }

    #[test]
    fn test_build_reads_params() {
        let mut params = BTreeMap::new();
        params.insert("spikes_damage".to_string(), 3.0);
        let f = FeatureKind::Spikes.build(&params, 1);
        assert_eq!(f.kind(), FeatureKind::Spikes);
        assert_eq!(FeatureKind::from_str("Checkpoint"), Some(FeatureKind::Checkpoint));
        assert_eq!(FeatureKind::from_str("lava"), None);
    }

    #[test]
    fn test_draw_emits_primitives() {
        let mut list = DrawList::new();
        Spikes::new(1).draw(&Rect::new(0.0, 50.0, 32.0, 16.0), &mut list);
        assert_eq!(list.len(), 8);
        list.clear();
        Checkpoint.draw(&Rect::new(0.0, 50.0, 32.0, 16.0), &mut list);
        assert_eq!(list.len(), 2);
    }
}
