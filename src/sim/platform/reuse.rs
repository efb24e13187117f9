//! What happens to a platform once it has been consumed

use rand::Rng;

use crate::sim::actor::{ActorBody, ActorState};
use crate::sim::context::WorldContext;

/// Pooling policy for a consumed platform.
///
/// Only called while the platform is `Consumed`. Leaving it consumed
/// tells the caller to remove it.
pub trait ReuseStrategy {
    fn reuse(&mut self, body: &mut ActorBody, repeated_y: bool, ctx: &mut WorldContext);
}

/// Recycle the platform at a random x below the viewport.
///
/// Border platforms (`repeated_y`) are instead moved one full screen plus
/// their own height further down, forming an endless vertical conveyor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomizePosition;

impl ReuseStrategy for RandomizePosition {
    fn reuse(&mut self, body: &mut ActorBody, repeated_y: bool, ctx: &mut WorldContext) {
        let game_width = ctx.settings.game_width;
        let game_height = ctx.settings.game_height;

        if repeated_y {
            body.rect.y += game_height + body.rect.height;
        } else {
            let max_x = (game_width - body.rect.width).max(0.0);
            body.rect.x = ctx.rng.random_range(0.0..=max_x);
            body.rect.y = ctx.view_bottom();
        }
        body.state = ActorState::Ongoing;
    }
}

/// Permanent removal, used for scene-authored platforms
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReuse;

impl ReuseStrategy for NoReuse {
    fn reuse(&mut self, body: &mut ActorBody, _repeated_y: bool, _ctx: &mut WorldContext) {
        body.state = ActorState::Consumed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rect, Settings};

    #[test]
    fn test_randomize_moves_below_view() {
        let mut ctx = WorldContext::new(Settings::default(), 42);
        ctx.camera.y = 1000.0;
        let mut body = ActorBody::new(Rect::new(10.0, 900.0, 100.0, 16.0));
        body.state = ActorState::Consumed;

        RandomizePosition.reuse(&mut body, false, &mut ctx);

        assert_eq!(body.state, ActorState::Ongoing);
        assert_eq!(body.rect.y, 1000.0 + ctx.settings.game_height);
        assert!(body.rect.x >= 0.0 && body.rect.x <= ctx.settings.game_width - 100.0);
    }

    #[test]
    fn test_randomize_repeated_y_conveyor() {
        let mut ctx = WorldContext::new(Settings::default(), 42);
        let mut body = ActorBody::new(Rect::new(0.0, -500.0, 16.0, 480.0));
        body.state = ActorState::Consumed;

        RandomizePosition.reuse(&mut body, true, &mut ctx);

        assert_eq!(body.rect.x, 0.0);
        assert_eq!(body.rect.y, -500.0 + 480.0 + 480.0);
        assert_eq!(body.state, ActorState::Ongoing);
    }

    #[test]
    fn test_wide_platform_pinned_to_left() {
        let mut ctx = WorldContext::new(Settings::default(), 7);
        let mut body = ActorBody::new(Rect::new(5.0, -50.0, 2000.0, 16.0));
        body.state = ActorState::Consumed;
        RandomizePosition.reuse(&mut body, false, &mut ctx);
        assert_eq!(body.rect.x, 0.0);
    }

    #[test]
    fn test_no_reuse_stays_consumed() {
        let mut ctx = WorldContext::new(Settings::default(), 1);
        let mut body = ActorBody::new(Rect::new(0.0, -50.0, 10.0, 10.0));
        body.state = ActorState::Consumed;
        NoReuse.reuse(&mut body, false, &mut ctx);
        assert_eq!(body.state, ActorState::Consumed);
        assert_eq!(body.rect.y, -50.0);
    }
}
