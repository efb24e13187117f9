//! Collectible bonuses and their spawner

use rand::Rng;

use super::actor::{Actor, ActorBody, ActorState, GroupId};
use super::context::WorldContext;
use super::events::GameEvent;
use crate::Rect;
use crate::render::{Canvas, Color};

pub const BONUS_SIZE: f32 = 16.0;
const BOB_AMPLITUDE: f32 = 3.0;
const BOB_SPEED: f32 = 4.0;

/// Score pickup. Touching it fires a score event and consumes it.
pub struct Bonus {
    body: ActorBody,
    value: i32,
    /// Resting y, the drawn position bobs around it
    base_y: f32,
    phase: f32,
}

impl Bonus {
    pub fn new(x: f32, y: f32, value: i32) -> Self {
        Self {
            body: ActorBody::new(Rect::new(x, y, BONUS_SIZE, BONUS_SIZE)),
            value,
            base_y: y,
            phase: 0.0,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn update(&mut self, ctx: &WorldContext, dt: f32) {
        self.phase += BOB_SPEED * dt;
        self.body.rect.y = self.base_y + BOB_AMPLITUDE * self.phase.sin();
        if self.body.rect.bottom() < ctx.view_top() {
            self.body.state = ActorState::Consumed;
        }
    }

    /// Collect the bonus once. Returns false if it was already taken.
    pub fn collect(&mut self, ctx: &mut WorldContext) -> bool {
        if self.body.is_consumed() {
            return false;
        }
        self.body.state = ActorState::Consumed;
        ctx.emit(GameEvent::Score(self.value));
        true
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, view: &Rect) {
        let screen = self.body.rect.relative_to(view);
        canvas.fill_rect(screen, Color::GOLD);
        canvas.outline_rect(screen, 1.0, Color::WHITE);
    }
}

impl Actor for Bonus {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn group_id(&self) -> GroupId {
        GroupId::Pickup
    }
}

/// Raises [`GameEvent::BonusSpawn`] at a fixed interval with normalized
/// coordinates; the game turns these into [`Bonus`] actors.
#[derive(Debug, Clone)]
pub struct BonusManager {
    interval: f32,
    timer: f32,
}

impl BonusManager {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, ctx: &mut WorldContext, dt: f32) {
        if self.interval <= 0.0 {
            return;
        }
        self.timer += dt;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            let x = ctx.rng.random_range(0.0..1.0);
            let y = ctx.rng.random_range(0.5..1.0);
            ctx.emit(GameEvent::BonusSpawn { x, y });
        }
    }

    /// World position for a normalized spawn inside the current view
    pub fn world_position(x: f32, y: f32, ctx: &WorldContext) -> (f32, f32) {
        let view = ctx.camera;
        (
            view.x + x * (view.width - BONUS_SIZE).max(0.0),
            view.y + y * (view.height - BONUS_SIZE).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_collect_once() {
        let mut ctx = WorldContext::new(Settings::default(), 1);
        let mut bonus = Bonus::new(10.0, 10.0, 10);
        assert!(bonus.collect(&mut ctx));
        assert!(!bonus.collect(&mut ctx));
        assert_eq!(ctx.outbox, vec![GameEvent::Score(10)]);
        assert_eq!(bonus.group_id(), GroupId::Pickup);
    }

    #[test]
    fn test_bob_stays_near_base() {
        let ctx = WorldContext::new(Settings::default(), 1);
        let mut bonus = Bonus::new(10.0, 100.0, 10);
        for _ in 0..100 {
            bonus.update(&ctx, 1.0 / 60.0);
            assert!((bonus.rectangle().y - 100.0).abs() <= BOB_AMPLITUDE + 1e-3);
        }
    }

    #[test]
    fn test_manager_interval() {
        let mut ctx = WorldContext::new(Settings::default(), 9);
        let mut manager = BonusManager::new(3.0);
        manager.update(&mut ctx, 2.9);
        assert!(ctx.outbox.is_empty());
        manager.update(&mut ctx, 0.2);
        assert_eq!(ctx.outbox.len(), 1);
        match ctx.outbox[0] {
            GameEvent::BonusSpawn { x, y } => {
                assert!((0.0..1.0).contains(&x));
                assert!((0.5..1.0).contains(&y));
            }
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_world_position_inside_view() {
        let mut ctx = WorldContext::new(Settings::default(), 1);
        ctx.camera.y = 500.0;
        let (x, y) = BonusManager::world_position(1.0, 0.0, &ctx);
        assert_eq!(x, 640.0 - BONUS_SIZE);
        assert_eq!(y, 500.0);
    }
}
