//! Per-tick processing budget.

use rearm_core::Tick;

/// Counts agents fully processed in the current tick.
///
/// The counter resets itself whenever it observes a new tick, so the engine
/// needs no explicit "tick started" call from the host — important because
/// the host may skip ticks or evaluate agents at arbitrary points in its own
/// loop.
#[derive(Debug, Default)]
pub struct TickBudget {
    tick: Tick,
    used: u32,
}

impl TickBudget {
    pub fn new() -> Self {
        Self::default()
    }

    fn roll(&mut self, now: Tick) {
        if self.tick != now {
            self.tick = now;
            self.used = 0;
        }
    }

    /// `true` when `cap` agents have already been processed this tick.
    pub fn exhausted(&mut self, now: Tick, cap: u32) -> bool {
        self.roll(now);
        self.used >= cap
    }

    /// Count one processed agent.
    pub fn consume(&mut self, now: Tick) {
        self.roll(now);
        self.used += 1;
    }

    /// Agents processed so far this tick (telemetry).
    pub fn used(&mut self, now: Tick) -> u32 {
        self.roll(now);
        self.used
    }

    pub fn reset(&mut self) {
        self.tick = Tick::ZERO;
        self.used = 0;
    }
}
