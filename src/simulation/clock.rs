/*!
 * Simulation Clock
 */

use crate::core::limits::IDLE_TICK;
use crate::core::types::Ticks;

/// Monotonic logical clock, advanced only by the simulation loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationClock {
    now: Ticks,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn advance(&mut self, delta: Ticks) -> Ticks {
        self.now = self.now.saturating_add(delta);
        self.now
    }

    /// One idle tick
    pub fn tick(&mut self) -> Ticks {
        self.advance(IDLE_TICK)
    }
}
