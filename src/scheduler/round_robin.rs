/*!
 * Round-Robin
 * Preemptive FIFO rotation with a fixed time quantum
 */

use super::{Dispatcher, Policy};
use crate::core::types::{Slot, Ticks};
use crate::process::ProcessRegistry;
use std::collections::VecDeque;
use tracing::trace;

/// Round-robin dispatcher.
///
/// Queue membership per slot: Not-Queued -> Queued -> Running -> Queued
/// (remaining time left) or Completed. A slot is in the queue at most once.
#[derive(Debug, Clone)]
pub struct RoundRobinDispatcher {
    quantum: Ticks,
    ready: VecDeque<Slot>,
    queued: Vec<bool>,
    // Arrival already observed; never re-admitted through the arrival path
    arrived: Vec<bool>,
}

impl RoundRobinDispatcher {
    pub fn new(quantum: Ticks) -> Self {
        Self {
            quantum,
            ready: VecDeque::new(),
            queued: Vec::new(),
            arrived: Vec::new(),
        }
    }

    /// Current ready queue, head first
    pub fn ready_queue(&self) -> Vec<Slot> {
        self.ready.iter().copied().collect()
    }

    fn ensure_capacity(&mut self, len: usize) {
        if self.queued.len() < len {
            self.queued.resize(len, false);
            self.arrived.resize(len, false);
        }
    }

    fn enqueue(&mut self, slot: Slot) {
        if self.queued[slot] {
            return;
        }
        self.queued[slot] = true;
        self.ready.push_back(slot);
    }

    /// Append newly arrived slots in ascending arrival order (slot order on ties)
    fn admit_arrivals(&mut self, registry: &ProcessRegistry, now: Ticks) {
        self.ensure_capacity(registry.len());

        let mut arrivals: Vec<Slot> = registry
            .eligible(now)
            .filter(|&slot| !self.arrived[slot])
            .collect();
        arrivals.sort_by_key(|&slot| (registry.descriptor(slot).arrival_time, slot));

        for slot in arrivals {
            self.arrived[slot] = true;
            trace!(pid = registry.descriptor(slot).pid, now, "Arrival queued");
            self.enqueue(slot);
        }
    }
}

impl Dispatcher for RoundRobinDispatcher {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn select_next(&mut self, registry: &ProcessRegistry, now: Ticks) -> Option<Slot> {
        self.admit_arrivals(registry, now);

        while let Some(slot) = self.ready.pop_front() {
            self.queued[slot] = false;
            if registry.is_eligible(slot, now) {
                return Some(slot);
            }
        }
        None
    }

    fn slice(&self, registry: &ProcessRegistry, slot: Slot) -> Ticks {
        registry.state(slot).remaining_time.min(self.quantum)
    }

    // Arrivals during the slice queue up ahead of the preempted process
    fn after_slice(&mut self, registry: &ProcessRegistry, slot: Slot, now: Ticks) -> bool {
        self.admit_arrivals(registry, now);

        if registry.state(slot).remaining_time > 0 {
            self.enqueue(slot);
            true
        } else {
            false
        }
    }
}
