/*!
 * Priority Scheduling (non-preemptive)
 */

use super::{min_eligible_by, Dispatcher, Policy};
use crate::core::types::{Priority, Slot, Ticks};
use crate::process::ProcessRegistry;

/// Lowest priority rank first; shorter burst wins ties
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityDispatcher;

impl Dispatcher for PriorityDispatcher {
    fn policy(&self) -> Policy {
        Policy::Priority
    }

    fn select_next(&mut self, registry: &ProcessRegistry, now: Ticks) -> Option<Slot> {
        // Validation guarantees a rank under this policy
        min_eligible_by(registry, now, |p| {
            (p.priority.unwrap_or(Priority::MAX), p.burst_time)
        })
    }
}
