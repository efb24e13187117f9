//! Actor collision contract
//!
//! Every collidable entity (player, monster, platform, bonus) owns an
//! [`ActorBody`] and implements [`Actor`]. The group id is a coarse
//! dispatch tag, constant per concrete type.

use serde::{Deserialize, Serialize};

use super::context::WorldContext;
use crate::Rect;

/// Lifecycle of an actor within the owning container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActorState {
    #[default]
    Ongoing,
    /// Ready for removal or recycling this tick
    Consumed,
}

/// Collision dispatch tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GroupId {
    Player = 0,
    Platform = 1,
    /// Shared by bonuses and monsters
    Pickup = 2,
}

impl GroupId {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Rectangle + lifecycle shared by every actor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorBody {
    pub rect: Rect,
    pub state: ActorState,
}

impl ActorBody {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            state: ActorState::Ongoing,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.state == ActorState::Consumed
    }
}

/// Capability interface every actor exposes
pub trait Actor {
    fn body(&self) -> &ActorBody;
    fn body_mut(&mut self) -> &mut ActorBody;
    fn group_id(&self) -> GroupId;

    fn rectangle(&self) -> Rect {
        self.body().rect
    }

    fn set_rectangle(&mut self, rect: Rect) {
        self.body_mut().rect = rect;
    }

    fn state(&self) -> ActorState {
        self.body().state
    }

    fn set_state(&mut self, state: ActorState) {
        self.body_mut().state = state;
    }

    fn check_collision(&self, other: &dyn Actor) -> bool {
        self.rectangle().intersects(&other.rectangle())
    }
}

/// Actors that hazards and opponents can hurt
pub trait Combatant: Actor {
    /// Apply `amount` damage coming from the rectangle `source`
    fn take_damage(&mut self, amount: i32, source: &Rect, ctx: &mut WorldContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(ActorBody);

    impl Actor for Dummy {
        fn body(&self) -> &ActorBody {
            &self.0
        }
        fn body_mut(&mut self) -> &mut ActorBody {
            &mut self.0
        }
        fn group_id(&self) -> GroupId {
            GroupId::Platform
        }
    }

    #[test]
    fn test_contract_defaults() {
        let mut a = Dummy(ActorBody::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = Dummy(ActorBody::new(Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.check_collision(&b));
        assert_eq!(a.state(), ActorState::Ongoing);

        a.set_rectangle(Rect::new(50.0, 50.0, 1.0, 1.0));
        assert!(!a.check_collision(&b));

        a.set_state(ActorState::Consumed);
        assert!(a.body().is_consumed());
        assert_eq!(a.group_id().as_u8(), 1);
    }
}
