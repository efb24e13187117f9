//! Fixed-interval physics clock
//!
//! Render frames arrive at any rate. Physics runs only once enough time
//! has piled up since the last physics tick, and is handed that elapsed
//! time capped to a maximum step.

/// Physics cadence decoupled from the render loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsClock {
    interval: f32,
    max_delta: f32,
    since_last: f32,
    ticks: u64,
}

impl PhysicsClock {
    pub fn new(interval: f32, max_delta: f32) -> Self {
        Self {
            interval,
            max_delta: max_delta.max(interval),
            since_last: 0.0,
            ticks: 0,
        }
    }

    /// Account for one render frame. Returns the physics delta when a
    /// tick is due.
    pub fn advance(&mut self, frame_dt: f32) -> Option<f32> {
        self.since_last += frame_dt.max(0.0);
        if self.since_last < self.interval {
            return None;
        }
        let delta = self.since_last.min(self.max_delta);
        self.since_last = 0.0;
        self.ticks += 1;
        Some(delta)
    }

    /// Physics ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
