/*!
 * Shortest Job First (non-preemptive)
 */

use super::{min_eligible_by, Dispatcher, Policy};
use crate::core::types::{Slot, Ticks};
use crate::process::ProcessRegistry;

/// Picks the shortest burst among arrived processes; earlier arrival wins ties
#[derive(Debug, Default, Clone, Copy)]
pub struct SjfDispatcher;

impl Dispatcher for SjfDispatcher {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn select_next(&mut self, registry: &ProcessRegistry, now: Ticks) -> Option<Slot> {
        min_eligible_by(registry, now, |p| (p.burst_time, p.arrival_time))
    }
}
