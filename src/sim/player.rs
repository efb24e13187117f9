//! The player character
//!
//! Movement, jump and dash physics, damage with knockback and
//! invincibility frames, lives and checkpoint respawn. Everything the HUD
//! needs to know is emitted as [`GameEvent`]s into the world outbox.

use glam::Vec2;

use super::actor::{Actor, ActorBody, Combatant, GroupId};
use super::animation::{AnimationController, AnimationKind};
use super::collision::{Contacts, Solid, resolve_against};
use super::context::WorldContext;
use super::events::{DashState, GameEvent};
use crate::platform::InputState;
use crate::render::{Canvas, Color, SpriteFrame};
use crate::{Rect, Settings};

/// How long horizontal input is ignored after a hit
const KNOCKBACK_TIME: f32 = 0.2;

/// Player tunables, copied from [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub invincibility_duration: f32,
    pub knockback_force: f32,
    pub max_health: i32,
}

impl From<&Settings> for PlayerTuning {
    fn from(s: &Settings) -> Self {
        Self {
            move_speed: s.move_speed,
            jump_force: s.jump_force,
            gravity: s.gravity,
            terminal_velocity: s.terminal_velocity,
            dash_speed: s.dash_speed,
            dash_duration: s.dash_duration,
            dash_cooldown: s.dash_cooldown,
            invincibility_duration: s.invincibility_duration,
            knockback_force: s.knockback_force,
            max_health: s.max_health,
        }
    }
}

pub struct Player {
    body: ActorBody,
    velocity: Vec2,
    /// -1 facing left, 1 facing right
    facing: f32,
    grounded: bool,
    /// Platform motion picked up in the last collision pass, applied next tick
    ride_delta_x: f32,

    input: InputState,
    prev_input: InputState,
    jump_queued: bool,
    dash_queued: bool,

    dash_timer: f32,
    dash_cooldown: f32,
    dash_state: DashState,
    invincibility: f32,
    knockback: f32,

    health: i32,
    lives: u8,
    game_over: bool,
    spawn: Vec2,

    tuning: PlayerTuning,
    animation: AnimationController,
}

impl Player {
    /// Player standing with its feet at `(x, y)`
    pub fn new(x: f32, y: f32, settings: &Settings) -> Self {
        let rect = Rect::new(
            x - settings.player_width / 2.0,
            y - settings.player_height,
            settings.player_width,
            settings.player_height,
        );
        let tuning = PlayerTuning::from(settings);
        Self {
            body: ActorBody::new(rect),
            velocity: Vec2::ZERO,
            facing: 1.0,
            grounded: false,
            ride_delta_x: 0.0,
            input: InputState::default(),
            prev_input: InputState::default(),
            jump_queued: false,
            dash_queued: false,
            dash_timer: 0.0,
            dash_cooldown: 0.0,
            dash_state: DashState::Ready,
            invincibility: 0.0,
            knockback: 0.0,
            health: tuning.max_health,
            lives: settings.lives,
            game_over: false,
            spawn: Vec2::new(x, y),
            tuning,
            animation: AnimationController::with_rows(6, 12.0),
        }
    }

    /// Latch this frame's input. Jump and dash trigger on the press edge.
    pub fn process_input(&mut self, input: &InputState) {
        self.prev_input = self.input;
        self.input = *input;
        if input.jump && !self.prev_input.jump {
            self.jump_queued = true;
        }
        if input.dash && !self.prev_input.dash {
            self.dash_queued = true;
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }

    pub fn dash_state(&self) -> DashState {
        self.dash_state
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn animation(&self) -> AnimationKind {
        self.animation.current()
    }

    /// Feet position used as spawn point when no checkpoint exists
    pub fn set_spawn(&mut self, x: f32, y: f32) {
        self.spawn = Vec2::new(x, y);
    }

    fn set_dash_state(&mut self, state: DashState, ctx: &mut WorldContext) {
        if self.dash_state != state {
            self.dash_state = state;
            ctx.emit(GameEvent::DashState(state));
        }
    }

    fn update_dash(&mut self, ctx: &mut WorldContext, dt: f32) {
        if self.dash_timer > 0.0 {
            self.dash_timer -= dt;
            if self.dash_timer <= 0.0 {
                self.dash_timer = 0.0;
                self.dash_cooldown = self.tuning.dash_cooldown;
                self.set_dash_state(DashState::Cooldown, ctx);
            }
        } else if self.dash_cooldown > 0.0 {
            self.dash_cooldown -= dt;
            if self.dash_cooldown <= 0.0 {
                self.dash_cooldown = 0.0;
                self.set_dash_state(DashState::Ready, ctx);
            }
        }

        if self.dash_queued && self.dash_state == DashState::Ready {
            self.dash_timer = self.tuning.dash_duration;
            self.set_dash_state(DashState::Active, ctx);
        }
        self.dash_queued = false;
    }

    /// One physics tick
    pub fn update(&mut self, ctx: &mut WorldContext, dt: f32) {
        if self.game_over {
            return;
        }

        self.invincibility = (self.invincibility - dt).max(0.0);
        self.update_dash(ctx, dt);

        let axis = self.input.axis();
        if axis != 0.0 {
            self.facing = axis;
        }

        if self.is_dashing() {
            self.velocity = Vec2::new(self.facing * self.tuning.dash_speed, 0.0);
        } else {
            if self.knockback > 0.0 {
                self.knockback -= dt;
            } else {
                self.velocity.x = axis * self.tuning.move_speed;
            }

            if self.jump_queued && self.grounded {
                self.velocity.y = -self.tuning.jump_force;
                self.grounded = false;
            }
            self.velocity.y =
                (self.velocity.y + self.tuning.gravity * dt).min(self.tuning.terminal_velocity);
        }
        self.jump_queued = false;

        let rect = &mut self.body.rect;
        rect.x += self.ride_delta_x;
        rect.translate(self.velocity.x * dt, self.velocity.y * dt);
        ctx.bounds.clamp_x(rect);

        self.update_animation(dt);
        self.check_out_of_view(ctx);
    }

    fn update_animation(&mut self, dt: f32) {
        let kind = if self.is_dashing() {
            AnimationKind::Dash
        } else if !self.grounded && self.velocity.y < 0.0 {
            AnimationKind::Jump
        } else if !self.grounded {
            AnimationKind::Fall
        } else if self.velocity.x != 0.0 {
            AnimationKind::Run
        } else {
            AnimationKind::Idle
        };
        self.animation.play(kind);
        self.animation.update(dt);
    }

    fn check_out_of_view(&mut self, ctx: &mut WorldContext) {
        let rect = self.body.rect;
        let fell = match ctx.kill_y {
            Some(kill_y) => rect.y > kill_y,
            None => rect.y > ctx.view_bottom(),
        };
        let crushed = ctx.scrolling && rect.bottom() < ctx.view_top();
        if fell || crushed {
            log::info!("Player left the view ({})", if fell { "fell" } else { "crushed" });
            self.lose_life(ctx);
        }
    }

    /// Store the outcome of this tick's collision pass
    pub fn apply_contacts(&mut self, contacts: &Contacts) {
        self.grounded = contacts.grounded;
        self.ride_delta_x = if contacts.grounded {
            contacts.ride_delta_x
        } else {
            0.0
        };
    }

    /// Push the player out of every solid it overlaps
    pub fn resolve(&mut self, solids: &[Solid]) -> Contacts {
        let contacts = resolve_against(&mut self.body.rect, &mut self.velocity, solids);
        self.apply_contacts(&contacts);
        contacts
    }

    /// Spend a life: respawn at the checkpoint (or spawn), or end the game
    pub fn lose_life(&mut self, ctx: &mut WorldContext) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
            self.velocity = Vec2::ZERO;
            log::info!("Game over");
            ctx.emit(GameEvent::GameOver);
            return;
        }

        let (x, y) = ctx.checkpoint.unwrap_or((self.spawn.x, self.spawn.y));
        self.body.rect.x = x - self.body.rect.width / 2.0;
        self.body.rect.y = y - self.body.rect.height;
        self.velocity = Vec2::ZERO;
        self.ride_delta_x = 0.0;
        self.grounded = false;
        self.knockback = 0.0;
        self.dash_timer = 0.0;
        self.health = self.tuning.max_health;
        self.invincibility = self.tuning.invincibility_duration;

        log::info!("Player respawned at ({x:.0}, {y:.0}), {} lives left", self.lives);
        ctx.emit(GameEvent::PlayerRespawned { lives: self.lives });
        ctx.emit(GameEvent::PlayerDamaged {
            health: self.health,
        });
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, view: &Rect) {
        // Blink while invincible
        if self.is_invincible() && (self.invincibility * 10.0) as i32 % 2 == 0 {
            return;
        }
        let tint = if self.is_dashing() { Color::SKY } else { Color::WHITE };
        canvas.sprite(
            self.body.rect.relative_to(view),
            SpriteFrame {
                sheet: "player.png".to_string(),
                frame: self.animation.sheet_frame(),
                flip_x: self.facing < 0.0,
            },
            tint,
        );
    }
}

impl Actor for Player {
    fn body(&self) -> &ActorBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut ActorBody {
        &mut self.body
    }

    fn group_id(&self) -> GroupId {
        GroupId::Player
    }
}

impl Combatant for Player {
    fn take_damage(&mut self, amount: i32, source: &Rect, ctx: &mut WorldContext) {
        if self.game_over || self.is_invincible() || amount <= 0 {
            return;
        }

        self.health -= amount;
        self.invincibility = self.tuning.invincibility_duration;
        ctx.emit(GameEvent::PlayerDamaged {
            health: self.health.max(0),
        });

        let dx = self.body.rect.center().x - source.center().x;
        let dir = if dx != 0.0 { dx.signum() } else { -self.facing };
        self.velocity = Vec2::new(
            dir * self.tuning.knockback_force,
            -self.tuning.knockback_force * 0.6,
        );
        self.knockback = KNOCKBACK_TIME;
        self.dash_timer = 0.0;

        if self.health <= 0 {
            self.lose_life(ctx);
        }
    }
}
