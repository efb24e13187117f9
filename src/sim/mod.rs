//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed-interval physics ticks only
//! - One seeded RNG, owned by the world context
//! - Stable actor order (insertion order, spawns appended after each tick)
//! - No window or platform dependencies; drawing goes through `Canvas`

pub mod actor;
pub mod animation;
pub mod bonus;
pub mod bounds;
pub mod collision;
pub mod context;
pub mod events;
pub mod game;
pub mod monster;
pub mod platform;
pub mod player;
pub mod tick;

pub use actor::{Actor, ActorBody, ActorState, Combatant, GroupId};
pub use animation::{AnimationController, AnimationKind};
pub use bonus::{Bonus, BonusManager};
pub use bounds::{Border, WorldBounds};
pub use collision::{Contacts, Solid, resolve_against, separate};
pub use context::WorldContext;
pub use events::{DashState, EventDispatcher, GameEvent, Hud, Observer};
pub use game::{CameraMode, Entity, Game, GamePhase};
pub use monster::{Monster, StateKind, TransitionRule};
pub use platform::Platform;
pub use player::Player;
pub use tick::PhysicsClock;
