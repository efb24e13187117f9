//! Per-frame input snapshot

/// Input commands for a single render frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Jump (held)
    pub jump: bool,
    /// Dash (held; the player only reacts to the press edge)
    pub dash: bool,
    /// Quit request (window close, start+back on a pad)
    pub quit: bool,
}

impl InputState {
    /// Horizontal direction requested: -1, 0 or 1
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Scripted input used by the headless runner and attract mode.
///
/// Walks toward a target x (usually the nearest platform below), jumps
/// when grounded and dashes every few seconds.
#[derive(Debug, Clone, Default)]
pub struct DemoPilot {
    elapsed: f32,
    last_dash: f32,
}

impl DemoPilot {
    const DASH_EVERY: f32 = 4.0;
    const DEAD_ZONE: f32 = 6.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn steer(
        &mut self,
        player_x: f32,
        target_x: Option<f32>,
        grounded: bool,
        dt: f32,
    ) -> InputState {
        self.elapsed += dt;

        let mut input = InputState::default();
        match target_x {
            Some(tx) if tx < player_x - Self::DEAD_ZONE => input.left = true,
            Some(tx) if tx > player_x + Self::DEAD_ZONE => input.right = true,
            Some(_) => {}
            None => {
                // Wander so the player eventually falls off its ledge
                if (self.elapsed * 0.5).sin() > 0.0 {
                    input.right = true;
                } else {
                    input.left = true;
                }
            }
        }

        input.jump = grounded && target_x.is_none();
        if self.elapsed - self.last_dash > Self::DASH_EVERY {
            input.dash = true;
            self.last_dash = self.elapsed;
        }
        input
    }
}
