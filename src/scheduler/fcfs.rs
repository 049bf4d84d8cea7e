/*!
 * First-Come-First-Served
 */

use super::{min_eligible_by, Dispatcher, Policy};
use crate::core::types::{Slot, Ticks};
use crate::process::{ProcessDescriptor, ProcessRegistry};

/// Runs processes to completion in arrival order
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfsDispatcher;

impl Dispatcher for FcfsDispatcher {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    // Stable sort: equal arrivals keep their input order
    fn arrange(&self, processes: &mut [ProcessDescriptor]) {
        processes.sort_by_key(|p| p.arrival_time);
    }

    fn select_next(&mut self, registry: &ProcessRegistry, now: Ticks) -> Option<Slot> {
        min_eligible_by(registry, now, |p| p.arrival_time)
    }
}
