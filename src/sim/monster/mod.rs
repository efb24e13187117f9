//! Preset-driven monsters
//!
//! A [`Monster`] owns one strategy object per registered [`StateKind`] and
//! exactly one active state. Data-driven [`TransitionRule`]s from the
//! preset are checked before the active state's own logic.

pub mod state;

pub use state::{AiContext, MonsterCore, MonsterState, StateDurations, StateKind};

use std::collections::BTreeMap;

use glam::Vec2;

use super::actor::{Actor, ActorBody, ActorState, Combatant, GroupId};
use super::animation::AnimationController;
use super::bounds::Border;
use super::collision::{Contacts, Solid, resolve_against};
use super::context::WorldContext;
use super::events::GameEvent;
use crate::error::{GameError, Result};
use crate::render::{Canvas, Color, SpriteFrame};
use crate::scene::MonsterPreset;
use crate::scene::preset::TransitionConfig;
use crate::Rect;

const MAX_FALL_SPEED: f32 = 600.0;

/// Condition attached to a data-driven transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    PlayerInRange(f32),
    PlayerOutOfRange(f32),
    /// Seconds spent in the current state
    Timer(f32),
    /// Health strictly below this value
    HealthBelow(f32),
}

impl Condition {
    pub fn parse(name: &str, value: f32) -> Option<Self> {
        match name {
            "player_in_range" => Some(Condition::PlayerInRange(value)),
            "player_out_of_range" => Some(Condition::PlayerOutOfRange(value)),
            "timer" => Some(Condition::Timer(value)),
            "health_below" => Some(Condition::HealthBelow(value)),
            _ => None,
        }
    }

    pub fn holds(&self, m: &MonsterCore, ai: &AiContext) -> bool {
        match *self {
            Condition::PlayerInRange(range) => m.player_within(ai, range),
            Condition::PlayerOutOfRange(range) => !m.player_within(ai, range),
            Condition::Timer(seconds) => m.time_in_state >= seconds,
            Condition::HealthBelow(health) => (m.health as f32) < health,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRule {
    pub from: StateKind,
    pub to: StateKind,
    pub condition: Condition,
}

impl TransitionRule {
    /// Parse one preset transition, logging and skipping anything unknown
    pub fn from_config(config: &TransitionConfig) -> Option<Self> {
        let from = StateKind::from_str(&config.from_state);
        let to = StateKind::from_str(&config.to_state);
        let condition = Condition::parse(&config.condition, config.condition_value);
        match (from, to, condition) {
            (Some(from), Some(to), Some(condition)) => Some(Self { from, to, condition }),
            _ => {
                log::warn!(
                    "Skipping transition {} -> {} on '{}'",
                    config.from_state,
                    config.to_state,
                    config.condition
                );
                None
            }
        }
    }
}

pub struct Monster {
    name: String,
    sprite_sheet: String,
    core: MonsterCore,
    states: BTreeMap<StateKind, Box<dyn MonsterState>>,
    current: StateKind,
    rules: Vec<TransitionRule>,
    transitions: u32,
}

impl Monster {
    /// Build a monster standing with its feet at world `(x, y)`.
    ///
    /// Fails when the preset does not register the `idle` state.
    pub fn new(preset: &MonsterPreset, x: f32, y: f32) -> Result<Self> {
        let mut states: BTreeMap<StateKind, Box<dyn MonsterState>> = BTreeMap::new();
        for name in &preset.state_config.available_states {
            match StateKind::from_str(name) {
                Some(kind) => {
                    states.insert(kind, kind.build());
                }
                None => log::warn!("Monster '{}': unknown state '{}'", preset.name, name),
            }
        }
        if !states.contains_key(&StateKind::Idle) {
            return Err(GameError::MissingIdleState {
                monster: preset.name.clone(),
            });
        }

        let initial = match StateKind::from_str(&preset.state_config.initial_state) {
            Some(kind) if states.contains_key(&kind) => kind,
            _ => {
                log::warn!(
                    "Monster '{}': initial state '{}' not available, starting idle",
                    preset.name,
                    preset.state_config.initial_state
                );
                StateKind::Idle
            }
        };

        let rules = preset
            .state_config
            .transitions
            .iter()
            .filter_map(TransitionRule::from_config)
            .filter(|r| states.contains_key(&r.from) && states.contains_key(&r.to))
            .collect();

        let defaults = StateDurations::default();
        let durations = StateDurations {
            idle: preset.state_duration("idle").unwrap_or(defaults.idle),
            attack: preset.state_duration("attack").unwrap_or(defaults.attack),
            hurt: preset.state_duration("hurt").unwrap_or(defaults.hurt),
            death: preset.state_duration("death").unwrap_or(defaults.death),
        };

        let visual = &preset.visual;
        let stats = &preset.stats;
        let behavior = &preset.behavior;
        let core = MonsterCore {
            body: ActorBody::new(Rect::new(
                x - visual.width / 2.0,
                y - visual.height,
                visual.width,
                visual.height,
            )),
            velocity: Vec2::ZERO,
            facing: 1.0,
            health: stats.max_health,
            max_health: stats.max_health,
            speed: stats.movement_speed,
            patrol_multiplier: behavior.patrol_speed_multiplier,
            chase_multiplier: behavior.chase_speed_multiplier,
            patrol_range: behavior.patrol_range,
            chase_range: behavior.chase_range,
            attack_range: behavior.attack_range,
            origin_x: x,
            grounded: false,
            can_fly: behavior.can_fly,
            damage: stats.damage,
            knockback_force: stats.knockback_force,
            attack_requested: false,
            attack_cooldown: 0.0,
            attack_cooldown_time: stats.attack_cooldown,
            time_in_state: 0.0,
            durations,
            animation: AnimationController::with_rows(4, 8.0),
        };

        let mut monster = Self {
            name: preset.name.clone(),
            sprite_sheet: visual.sprite_sheet.clone(),
            core,
            states,
            current: initial,
            rules,
            transitions: 0,
        };
        if let Some(state) = monster.states.get_mut(&initial) {
            state.enter(&mut monster.core);
        }
        log::debug!("Spawned monster '{}' at ({x:.0}, {y:.0})", monster.name);
        Ok(monster)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_state(&self) -> StateKind {
        self.current
    }

    pub fn has_state(&self, kind: StateKind) -> bool {
        self.states.contains_key(&kind)
    }

    /// Number of state changes since construction
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }

    pub fn health(&self) -> i32 {
        self.core.health
    }

    pub fn is_dying(&self) -> bool {
        self.current == StateKind::Death
    }

    pub fn velocity(&self) -> Vec2 {
        self.core.velocity
    }

    pub fn facing(&self) -> f32 {
        self.core.facing
    }

    pub fn damage(&self) -> i32 {
        self.core.damage
    }

    pub fn attack_range(&self) -> f32 {
        self.core.attack_range
    }

    pub fn core(&self) -> &MonsterCore {
        &self.core
    }

    /// Switch to `requested`. Missing `hurt` or `patrol` states fall back
    /// to `idle`; other same-state and unregistered requests are ignored.
    pub fn change_state(&mut self, requested: StateKind) {
        let next = match requested {
            kind @ (StateKind::Hurt | StateKind::Patrol) if !self.states.contains_key(&kind) => {
                StateKind::Idle
            }
            kind => kind,
        };
        if next == self.current {
            return;
        }
        let Some(state) = self.states.get_mut(&next) else {
            log::debug!("Monster '{}' has no {} state", self.name, next.as_str());
            return;
        };
        log::trace!("Monster '{}': {} -> {}", self.name, self.current.as_str(), next.as_str());
        self.current = next;
        self.core.time_in_state = 0.0;
        self.transitions += 1;
        state.enter(&mut self.core);
    }

    fn next_state(&mut self, ai: &AiContext, dt: f32) -> Option<StateKind> {
        let current = self.current;
        let core = &self.core;
        // Death is final: preset rules never revive a monster
        if current != StateKind::Death {
            if let Some(rule) = self
                .rules
                .iter()
                .find(|r| r.from == current && r.condition.holds(core, ai))
            {
                return Some(rule.to);
            }
        }
        self.states
            .get_mut(&current)
            .and_then(|state| state.update(&mut self.core, ai, dt))
    }

    /// AI plus physics for one tick
    pub fn update(&mut self, ai: &AiContext, dt: f32) {
        if self.core.body.is_consumed() {
            return;
        }
        self.core.attack_cooldown = (self.core.attack_cooldown - dt).max(0.0);
        self.core.time_in_state += dt;

        if let Some(next) = self.next_state(ai, dt) {
            self.change_state(next);
        }

        let core = &mut self.core;
        if !core.can_fly {
            core.velocity.y = (core.velocity.y + ai.gravity * dt).min(MAX_FALL_SPEED);
        }
        core.body.rect.translate(core.velocity.x * dt, core.velocity.y * dt);

        if let Some(border @ (Border::Left | Border::Right)) = ai.bounds.probe(&core.body.rect) {
            ai.bounds.clamp_x(&mut core.body.rect);
            core.facing = if border == Border::Left { 1.0 } else { -1.0 };
            core.velocity.x = core.facing * core.velocity.x.abs();
        }
        core.animation.update(dt);
    }

    /// Push out of platforms; bumping a wall turns the monster around
    pub fn resolve(&mut self, solids: &[Solid]) -> Contacts {
        let core = &mut self.core;
        let contacts = resolve_against(&mut core.body.rect, &mut core.velocity, solids);
        core.grounded = contacts.grounded;
        if contacts.blocked_x && self.current == StateKind::Patrol {
            core.facing = -core.facing;
        }
        contacts
    }

    /// Damage of an attack started this tick, if any
    pub fn take_attack(&mut self) -> Option<i32> {
        std::mem::take(&mut self.core.attack_requested).then_some(self.core.damage)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, view: &Rect) {
        let tint = match self.current {
            StateKind::Hurt => Color::RED,
            StateKind::Death => Color::WHITE.with_alpha(128),
            _ => Color::WHITE,
        };
        canvas.sprite(
            self.core.body.rect.relative_to(view),
            SpriteFrame {
                sheet: self.sprite_sheet.clone(),
                frame: self.core.animation.sheet_frame(),
                flip_x: self.core.facing < 0.0,
            },
            tint,
        );
    }
}

impl Actor for Monster {
    fn body(&self) -> &ActorBody {
        &self.core.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.core.body
    }

    fn group_id(&self) -> GroupId {
        GroupId::Pickup
    }
}

impl Combatant for Monster {
    fn take_damage(&mut self, amount: i32, _source: &Rect, ctx: &mut WorldContext) {
        if self.is_dying() || self.core.body.is_consumed() || amount <= 0 {
            return;
        }

        self.core.health -= amount;
        self.core.velocity.x = -self.core.facing * self.core.knockback_force;

        if self.core.health <= 0 {
            log::info!("Monster '{}' defeated", self.name);
            if self.has_state(StateKind::Death) {
                self.change_state(StateKind::Death);
            } else {
                // No death animation to play out
                self.core.velocity = Vec2::ZERO;
                self.core.attack_requested = false;
                self.core.body.state = ActorState::Consumed;
            }
            ctx.emit(GameEvent::MonsterDefeated);
            ctx.emit(GameEvent::Score(ctx.settings.monster_score));
        } else {
            self.change_state(StateKind::Hurt);
        }
    }
}
