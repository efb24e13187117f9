//! Named monster AI states
//!
//! Each state is a small strategy acting on [`MonsterCore`]. `enter` runs
//! once per transition; `update` runs once per physics tick and may
//! request the next state.

use glam::Vec2;

use crate::Rect;
use crate::sim::actor::ActorBody;
use crate::sim::animation::{AnimationController, AnimationKind};
use crate::sim::bounds::WorldBounds;

/// Velocity multiplier applied every tick while hurt
const HURT_DECAY: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKind {
    Idle,
    Patrol,
    Chase,
    Attack,
    Hurt,
    Death,
}

impl StateKind {
    pub const ALL: [StateKind; 6] = [
        StateKind::Idle,
        StateKind::Patrol,
        StateKind::Chase,
        StateKind::Attack,
        StateKind::Hurt,
        StateKind::Death,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Idle => "idle",
            StateKind::Patrol => "patrol",
            StateKind::Chase => "chase",
            StateKind::Attack => "attack",
            StateKind::Hurt => "hurt",
            StateKind::Death => "death",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Fresh strategy object for this state
    pub fn build(self) -> Box<dyn MonsterState> {
        match self {
            StateKind::Idle => Box::new(IdleState),
            StateKind::Patrol => Box::new(PatrolState),
            StateKind::Chase => Box::new(ChaseState),
            StateKind::Attack => Box::new(AttackState),
            StateKind::Hurt => Box::new(HurtState),
            StateKind::Death => Box::new(DeathState),
        }
    }
}

/// How long the timed states last, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDurations {
    pub idle: f32,
    pub attack: f32,
    pub hurt: f32,
    pub death: f32,
}

impl Default for StateDurations {
    fn default() -> Self {
        Self {
            idle: 2.0,
            attack: 0.5,
            hurt: 0.3,
            death: 1.0,
        }
    }
}

/// Everything a world tick tells the AI
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub player: Option<Rect>,
    pub bounds: WorldBounds,
    pub gravity: f32,
}

/// Mutable monster data the states operate on
#[derive(Debug, Clone)]
pub struct MonsterCore {
    pub body: ActorBody,
    pub velocity: Vec2,
    /// -1 facing left, 1 facing right
    pub facing: f32,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub patrol_multiplier: f32,
    pub chase_multiplier: f32,
    pub patrol_range: f32,
    pub chase_range: f32,
    pub attack_range: f32,
    /// Patrol is centered on the spawn x
    pub origin_x: f32,
    pub grounded: bool,
    pub can_fly: bool,
    pub damage: i32,
    pub knockback_force: f32,
    /// Set when an attack starts, taken by the game
    pub attack_requested: bool,
    pub attack_cooldown: f32,
    pub attack_cooldown_time: f32,
    pub time_in_state: f32,
    pub durations: StateDurations,
    pub animation: AnimationController,
}

impl MonsterCore {
    pub fn center_x(&self) -> f32 {
        self.body.rect.center().x
    }

    /// Center-to-center distance to `other`
    pub fn distance_to(&self, other: &Rect) -> f32 {
        self.body.rect.center().distance(other.center())
    }

    pub fn player_within(&self, ai: &AiContext, range: f32) -> bool {
        ai.player.is_some_and(|p| self.distance_to(&p) <= range)
    }

    fn walk(&mut self, multiplier: f32) {
        self.velocity.x = self.facing * self.speed * multiplier;
    }
}

pub trait MonsterState {
    fn kind(&self) -> StateKind;

    fn enter(&mut self, monster: &mut MonsterCore);

    /// Advance one tick. `Some` requests a transition.
    fn update(&mut self, monster: &mut MonsterCore, ai: &AiContext, dt: f32) -> Option<StateKind>;
}

pub struct IdleState;

impl MonsterState for IdleState {
    fn kind(&self) -> StateKind {
        StateKind::Idle
    }

    fn enter(&mut self, m: &mut MonsterCore) {
        m.velocity.x = 0.0;
        m.animation.play(AnimationKind::Idle);
    }

    fn update(&mut self, m: &mut MonsterCore, ai: &AiContext, _dt: f32) -> Option<StateKind> {
        m.velocity.x = 0.0;
        if m.player_within(ai, m.chase_range) {
            return Some(StateKind::Chase);
        }
        (m.time_in_state >= m.durations.idle).then_some(StateKind::Patrol)
    }
}

pub struct PatrolState;

impl MonsterState for PatrolState {
    fn kind(&self) -> StateKind {
        StateKind::Patrol
    }

    fn enter(&mut self, m: &mut MonsterCore) {
        m.walk(m.patrol_multiplier);
        m.animation.play(AnimationKind::Walk);
    }

    fn update(&mut self, m: &mut MonsterCore, ai: &AiContext, _dt: f32) -> Option<StateKind> {
        if m.player_within(ai, m.chase_range) {
            return Some(StateKind::Chase);
        }

        let x = m.center_x();
        if x >= m.origin_x + m.patrol_range && m.facing > 0.0 {
            m.facing = -1.0;
        } else if x <= m.origin_x - m.patrol_range && m.facing < 0.0 {
            m.facing = 1.0;
        }
        m.walk(m.patrol_multiplier);
        None
    }
}

pub struct ChaseState;

impl MonsterState for ChaseState {
    fn kind(&self) -> StateKind {
        StateKind::Chase
    }

    fn enter(&mut self, m: &mut MonsterCore) {
        m.animation.play(AnimationKind::Run);
    }

    fn update(&mut self, m: &mut MonsterCore, ai: &AiContext, _dt: f32) -> Option<StateKind> {
        let Some(player) = ai.player else {
            return Some(StateKind::Patrol);
        };

        let distance = m.distance_to(&player);
        if distance > m.chase_range {
            return Some(StateKind::Patrol);
        }
        if distance <= m.attack_range {
            return Some(StateKind::Attack);
        }

        let dx = player.center().x - m.center_x();
        if dx != 0.0 {
            m.facing = dx.signum();
        }
        m.walk(m.chase_multiplier);
        None
    }
}

pub struct AttackState;

impl MonsterState for AttackState {
    fn kind(&self) -> StateKind {
        StateKind::Attack
    }

    fn enter(&mut self, m: &mut MonsterCore) {
        m.velocity.x = 0.0;
        // A swing during cooldown plays the animation without striking
        if m.attack_cooldown <= 0.0 {
            m.attack_requested = true;
            m.attack_cooldown = m.attack_cooldown_time;
        }
        m.animation.play(AnimationKind::Attack);
    }

    fn update(&mut self, m: &mut MonsterCore, ai: &AiContext, _dt: f32) -> Option<StateKind> {
        m.velocity.x = 0.0;
        if m.time_in_state < m.durations.attack {
            return None;
        }
        if m.player_within(ai, m.chase_range) {
            Some(StateKind::Chase)
        } else {
            Some(StateKind::Patrol)
        }
    }
}

pub struct HurtState;

impl MonsterState for HurtState {
    fn kind(&self) -> StateKind {
        StateKind::Hurt
    }

    fn enter(&mut self, m: &mut MonsterCore) {
        m.attack_requested = false;
        m.animation.play(AnimationKind::Hurt);
    }

    fn update(&mut self, m: &mut MonsterCore, _ai: &AiContext, _dt: f32) -> Option<StateKind> {
        m.velocity.x *= HURT_DECAY;
        (m.time_in_state >= m.durations.hurt).then_some(StateKind::Patrol)
    }
}

pub struct DeathState;

impl MonsterState for DeathState {
    fn kind(&self) -> StateKind {
        StateKind::Death
    }

    fn enter(&mut self, m: &mut MonsterCore) {
        m.velocity.x = 0.0;
        m.attack_requested = false;
        m.animation.play(AnimationKind::Death);
    }

    fn update(&mut self, m: &mut MonsterCore, _ai: &AiContext, _dt: f32) -> Option<StateKind> {
        m.velocity.x = 0.0;
        if m.time_in_state >= m.durations.death {
            m.body.state = crate::sim::actor::ActorState::Consumed;
        }
        None
    }
}
