//! Game events and the observer plumbing between actors, game and HUD
//!
//! Actors push typed [`GameEvent`]s into the world's outbox; the game
//! drains the outbox once per frame through an [`EventDispatcher`].
//! The semicolon wire format used by older HUD builds is still supported
//! through [`GameEvent::to_wire`] / [`GameEvent::parse_wire`].

use crate::error::{GameError, Result};

/// Dash availability as shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashState {
    #[default]
    Ready,
    Active,
    Cooldown,
}

impl DashState {
    fn code(self) -> i64 {
        match self {
            DashState::Ready => 0,
            DashState::Active => 1,
            DashState::Cooldown => 2,
        }
    }

    fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DashState::Ready),
            1 => Some(DashState::Active),
            2 => Some(DashState::Cooldown),
            _ => None,
        }
    }
}

/// Wire mode codes
const MODE_SCORE: i64 = 1;
const MODE_BONUS_SPAWN: i64 = 2;
const MODE_DASH: i64 = 4;
const MODE_GAME_OVER: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score delta
    Score(i32),
    /// Request a bonus at normalized viewport coordinates (0..1)
    BonusSpawn { x: f32, y: f32 },
    DashState(DashState),
    GameOver,
    PlayerDamaged { health: i32 },
    CheckpointReached { x: f32, y: f32 },
    MonsterDefeated,
    PlayerRespawned { lives: u8 },
}

impl GameEvent {
    /// Encode in the legacy `mode;payload...` format.
    ///
    /// Only the four legacy modes have an encoding.
    pub fn to_wire(&self) -> Option<String> {
        match *self {
            GameEvent::Score(delta) => Some(format!("{MODE_SCORE};{delta}")),
            GameEvent::BonusSpawn { x, y } => Some(format!("{MODE_BONUS_SPAWN};{x};{y}")),
            GameEvent::DashState(s) => Some(format!("{MODE_DASH};{}", s.code())),
            GameEvent::GameOver => Some(format!("{MODE_GAME_OVER}")),
            _ => None,
        }
    }

    /// Parse a legacy message. Tokens may carry labels around the number
    /// (`"score:+15"`); only the numeric characters are used.
    pub fn parse_wire(message: &str) -> Result<Self> {
        let invalid = || GameError::InvalidEvent(message.to_string());
        let mut tokens = message.split(';');

        let mode = tokens
            .next()
            .and_then(extract_number)
            .ok_or_else(invalid)? as i64;
        let mut next = || tokens.next().and_then(extract_number).ok_or_else(invalid);

        match mode {
            MODE_SCORE => Ok(GameEvent::Score(next()? as i32)),
            MODE_BONUS_SPAWN => {
                let x = next()? as f32;
                let y = next()? as f32;
                Ok(GameEvent::BonusSpawn { x, y })
            }
            MODE_DASH => DashState::from_code(next()? as i64)
                .map(GameEvent::DashState)
                .ok_or_else(invalid),
            MODE_GAME_OVER => Ok(GameEvent::GameOver),
            _ => Err(invalid()),
        }
    }
}

/// Pull the number out of a mixed token: digits, one decimal point and a
/// minus sign seen before the first digit.
fn extract_number(token: &str) -> Option<f64> {
    let mut digits = String::new();
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in token.chars() {
        match c {
            '0'..='9' => {
                digits.push(c);
                seen_digit = true;
            }
            '.' if !seen_dot && seen_digit => {
                digits.push(c);
                seen_dot = true;
            }
            '-' if !seen_digit && digits.is_empty() => digits.push(c),
            _ => {}
        }
    }
    if !seen_digit {
        return None;
    }
    digits.parse().ok()
}

/// Receiver of dispatched game events
pub trait Observer {
    fn on_event(&mut self, event: &GameEvent);
}

/// Ordered fan-out of queued events to registered observers
#[derive(Default)]
pub struct EventDispatcher {
    observers: Vec<Box<dyn Observer>>,
    queue: Vec<GameEvent>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.queue.extend(events);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deliver every queued event to every observer, in emission order.
    /// Returns the delivered events.
    pub fn dispatch(&mut self) -> Vec<GameEvent> {
        let events = std::mem::take(&mut self.queue);
        for event in &events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
        events
    }
}

/// HUD model: what the overlay shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    pub score: i64,
    pub health: i32,
    pub lives: u8,
    pub dash: DashState,
    pub game_over: bool,
    pub last_checkpoint: Option<(f32, f32)>,
    pub monsters_defeated: u32,
}

impl Observer for Hud {
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Score(delta) => self.score += delta as i64,
            GameEvent::DashState(state) => self.dash = state,
            GameEvent::GameOver => self.game_over = true,
            GameEvent::PlayerDamaged { health } => self.health = health,
            GameEvent::CheckpointReached { x, y } => self.last_checkpoint = Some((x, y)),
            GameEvent::MonsterDefeated => self.monsters_defeated += 1,
            GameEvent::PlayerRespawned { lives } => self.lives = lives,
            GameEvent::BonusSpawn { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_wire_encoding() {
        assert_eq!(GameEvent::Score(15).to_wire().unwrap(), "1;15");
        assert_eq!(
            GameEvent::BonusSpawn { x: 0.25, y: 0.5 }.to_wire().unwrap(),
            "2;0.25;0.5"
        );
        assert_eq!(GameEvent::DashState(DashState::Active).to_wire().unwrap(), "4;1");
        assert_eq!(GameEvent::GameOver.to_wire().unwrap(), "12");
        assert!(GameEvent::MonsterDefeated.to_wire().is_none());
    }

    #[test]
    fn test_parse_mixed_tokens() {
        assert_eq!(GameEvent::parse_wire("1;score:+15").unwrap(), GameEvent::Score(15));
        assert_eq!(GameEvent::parse_wire("1;-5pts").unwrap(), GameEvent::Score(-5));
        assert_eq!(
            GameEvent::parse_wire("2;x=0.75;y=0.1").unwrap(),
            GameEvent::BonusSpawn { x: 0.75, y: 0.1 }
        );
        assert_eq!(
            GameEvent::parse_wire("4;state2").unwrap(),
            GameEvent::DashState(DashState::Cooldown)
        );
        assert_eq!(GameEvent::parse_wire("12").unwrap(), GameEvent::GameOver);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(GameEvent::parse_wire("").is_err());
        assert!(GameEvent::parse_wire("7;1").is_err());
        assert!(GameEvent::parse_wire("1;abc").is_err());
        assert!(GameEvent::parse_wire("2;0.5").is_err());
        assert!(GameEvent::parse_wire("4;9").is_err());
    }

    struct Recorder(Rc<RefCell<Vec<GameEvent>>>);

    impl Observer for Recorder {
        fn on_event(&mut self, event: &GameEvent) {
            self.0.borrow_mut().push(*event);
        }
    }

    #[test]
    fn test_dispatch_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.subscribe(Box::new(Recorder(seen.clone())));

        dispatcher.emit(GameEvent::Score(1));
        dispatcher.emit(GameEvent::GameOver);
        assert_eq!(dispatcher.pending(), 2);

        let delivered = dispatcher.dispatch();
        assert_eq!(delivered.len(), 2);
        assert_eq!(*seen.borrow(), vec![GameEvent::Score(1), GameEvent::GameOver]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_hud_tracks_events() {
        let mut hud = Hud::default();
        hud.on_event(&GameEvent::Score(10));
        hud.on_event(&GameEvent::Score(5));
        hud.on_event(&GameEvent::DashState(DashState::Cooldown));
        hud.on_event(&GameEvent::GameOver);
        assert_eq!(hud.score, 15);
        assert_eq!(hud.dash, DashState::Cooldown);
        assert!(hud.game_over);
    }
}
