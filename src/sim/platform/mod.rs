//! Platforms: rectangle + motion strategy + features + pooling policy

pub mod behavior;
pub mod feature;
pub mod reuse;

pub use behavior::{BehaviorKind, BehaviorStrategy};
pub use feature::{Feature, FeatureKind};
pub use reuse::{NoReuse, RandomizePosition, ReuseStrategy};

use super::actor::{Actor, ActorBody, ActorState, Combatant, GroupId};
use super::context::WorldContext;
use crate::render::{Canvas, Color};
use crate::scene::PlatformData;
use crate::{Rect, Settings, tile_to_world_rect};

pub struct Platform {
    body: ActorBody,
    pub color: Color,
    behavior: Box<dyn BehaviorStrategy>,
    features: Vec<Box<dyn Feature>>,
    reuse: Option<Box<dyn ReuseStrategy>>,
    /// Side border that wraps vertically instead of respawning at random
    repeated_y: bool,
    /// Horizontal displacement during the last update (carried riders follow it)
    delta_x: f32,
}

impl Platform {
    /// Static platform without features or reuse policy
    pub fn new(rect: Rect, color: Color) -> Self {
        Self {
            body: ActorBody::new(rect),
            color,
            behavior: Box::new(behavior::StaticBehavior),
            features: Vec::new(),
            reuse: None,
            repeated_y: false,
            delta_x: 0.0,
        }
    }

    /// Build a scene-authored platform. Unknown behaviors fall back to
    /// static, unknown features are skipped; both are logged.
    pub fn from_data(data: &PlatformData, settings: &Settings) -> Self {
        let rect = tile_to_world_rect(data.x, data.y, data.width, data.height);
        let mut platform = Self::new(rect, Color::DARK_GRAY);

        let kind = BehaviorKind::parse_or_static(&data.behavior);
        platform.set_behavior(kind.build(&data.behavior_params));

        for name in &data.features {
            match FeatureKind::from_str(name) {
                Some(kind) => {
                    platform.add_feature(kind.build(&data.feature_params, settings.spike_damage));
                }
                None => log::warn!("Unknown platform feature '{name}', ignored"),
            }
        }

        platform.set_reuse_strategy(Box::new(NoReuse));
        platform
    }

    pub fn with_behavior(mut self, behavior: Box<dyn BehaviorStrategy>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_reuse(mut self, reuse: Box<dyn ReuseStrategy>) -> Self {
        self.reuse = Some(reuse);
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeated_y = true;
        self
    }

    pub fn set_behavior(&mut self, behavior: Box<dyn BehaviorStrategy>) {
        self.behavior = behavior;
    }

    pub fn behavior_kind(&self) -> BehaviorKind {
        self.behavior.kind()
    }

    pub fn set_reuse_strategy(&mut self, reuse: Box<dyn ReuseStrategy>) {
        self.reuse = Some(reuse);
    }

    /// Attach a feature. Returns false (and drops it) if a feature of the
    /// same kind is already present.
    pub fn add_feature(&mut self, feature: Box<dyn Feature>) -> bool {
        if self.has_feature(feature.kind()) {
            log::debug!("Platform already has {}", feature.kind().as_str());
            return false;
        }
        self.features.push(feature);
        true
    }

    pub fn has_feature(&self, kind: FeatureKind) -> bool {
        self.features.iter().any(|f| f.kind() == kind)
    }

    pub fn features(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter().map(|f| f.as_ref())
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn repeated_y(&self) -> bool {
        self.repeated_y
    }

    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    /// Run the behavior strategy and record this tick's x displacement
    pub fn update(&mut self, ctx: &WorldContext, dt: f32) {
        let old_x = self.body.rect.x;
        self.behavior.update(&mut self.body, &ctx.camera, dt);
        self.delta_x = self.body.rect.x - old_x;
    }

    /// Apply the reuse policy to a consumed platform. Returns true if the
    /// platform is live again.
    pub fn reuse(&mut self, ctx: &mut WorldContext) -> bool {
        if self.body.state != ActorState::Consumed {
            return true;
        }
        if let Some(reuse) = self.reuse.as_mut() {
            reuse.reuse(&mut self.body, self.repeated_y, ctx);
        }
        self.delta_x = 0.0;
        self.body.state == ActorState::Ongoing
    }

    /// Forward a contact to every feature
    pub fn notify_features(&self, actor: &mut dyn Combatant, ctx: &mut WorldContext) {
        for feature in &self.features {
            feature.handle_collision(&self.body.rect, actor, ctx);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, view: &Rect) {
        let screen = self.body.rect.relative_to(view);
        canvas.fill_rect(screen, self.color);
        for feature in &self.features {
            feature.draw(&screen, canvas);
        }
    }
}

impl Actor for Platform {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn group_id(&self) -> GroupId {
        GroupId::Platform
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::render::DrawList;
    use feature::{Checkpoint, Spikes};

    fn data(behavior: &str, features: &[&str]) -> PlatformData {
        PlatformData {
            x: 2,
            y: 5,
            width: 3.0,
            height: 0.5,
            behavior: behavior.to_string(),
            behavior_params: BTreeMap::new(),
            features: features.iter().map(|s| s.to_string()).collect(),
            feature_params: BTreeMap::new(),
        }
    }

    #[test]
    fn test_feature_uniqueness() {
        let mut p = Platform::new(Rect::new(0.0, 0.0, 64.0, 16.0), Color::GRAY);
        assert!(p.add_feature(Box::new(Spikes::new(1))));
        assert!(!p.add_feature(Box::new(Spikes::new(5))));
        assert!(p.add_feature(Box::new(Checkpoint)));
        assert_eq!(p.feature_count(), 2);
        assert_eq!(p.features().filter(|f| f.kind() == FeatureKind::Spikes).count(), 1);
    }

    #[test]
    fn test_from_data() {
        let settings = Settings::default();
        let p = Platform::from_data(&data("horizontal", &["spikes", "checkpoint", "lava"]), &settings);
        assert_eq!(p.rectangle(), Rect::new(64.0, 160.0, 96.0, 16.0));
        assert_eq!(p.behavior_kind(), BehaviorKind::Horizontal);
        assert_eq!(p.feature_count(), 2);
        assert_eq!(p.group_id(), GroupId::Platform);

        let p = Platform::from_data(&data("bogus", &["spikes", "spikes"]), &settings);
        assert_eq!(p.behavior_kind(), BehaviorKind::Static);
        assert_eq!(p.feature_count(), 1);
    }

    #[test]
    fn test_randomize_pooling() {
        let mut ctx = WorldContext::new(Settings::default(), 3);
        let mut p = Platform::new(Rect::new(50.0, -40.0, 80.0, 16.0), Color::GRAY)
            .with_reuse(Box::new(RandomizePosition));
        let before_y = p.rectangle().y;

        p.set_state(ActorState::Consumed);
        assert!(p.reuse(&mut ctx));
        assert_eq!(p.state(), ActorState::Ongoing);
        assert_ne!(p.rectangle().y, before_y);
    }

    #[test]
    fn test_no_reuse_is_retired() {
        let mut ctx = WorldContext::new(Settings::default(), 3);
        let mut p = Platform::from_data(&data("static", &[]), &Settings::default());
        p.set_state(ActorState::Consumed);
        assert!(!p.reuse(&mut ctx));
        assert_eq!(p.state(), ActorState::Consumed);
    }

    #[test]
    fn test_update_records_delta_x() {
        let ctx = WorldContext::new(Settings::default(), 3);
        let mut p = Platform::new(Rect::new(100.0, 100.0, 80.0, 16.0), Color::GRAY)
            .with_behavior(BehaviorKind::Horizontal.build(&BTreeMap::new()));
        p.update(&ctx, 0.5);
        assert_eq!(p.delta_x(), 40.0);
    }

    #[test]
    fn test_update_retires_above_camera() {
        let mut ctx = WorldContext::new(Settings::default(), 3);
        let mut p = Platform::new(Rect::new(100.0, 100.0, 80.0, 16.0), Color::GRAY);
        ctx.camera.y = 200.0;
        p.update(&ctx, 0.1);
        assert_eq!(p.state(), ActorState::Consumed);
    }

    #[test]
    fn test_draw_is_camera_relative() {
        let mut list = DrawList::new();
        let mut p = Platform::new(Rect::new(100.0, 300.0, 80.0, 16.0), Color::GRAY);
        p.add_feature(Box::new(Checkpoint));
        p.draw(&mut list, &Rect::new(0.0, 250.0, 640.0, 480.0));
        assert_eq!(list.len(), 3);
        match &list.commands[0] {
            crate::render::DrawCommand::Fill { rect, .. } => assert_eq!(rect.y, 50.0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
