/*!
 * Dispatch Policies
 * Pluggable selection of the next process to run on the single CPU
 */

use crate::config::SimConfig;
use crate::core::errors::ConfigError;
use crate::core::types::{Slot, Ticks};
use crate::process::{ProcessDescriptor, ProcessRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod fcfs;
mod priority;
mod round_robin;
mod sjf;

pub use fcfs::FcfsDispatcher;
pub use priority::PriorityDispatcher;
pub use round_robin::RoundRobinDispatcher;
pub use sjf::SjfDispatcher;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First-come-first-served, non-preemptive
    Fcfs,
    /// Shortest job first, non-preemptive
    Sjf,
    /// Lowest priority rank first, non-preemptive
    Priority,
    /// Round-robin with fixed time quantum
    RoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
    ];

    /// Whether a dispatch may end before the process completes
    pub fn is_preemptive(self) -> bool {
        matches!(self, Policy::RoundRobin)
    }

    /// Build a fresh dispatcher for one run
    pub fn dispatcher(self, config: &SimConfig) -> Box<dyn Dispatcher> {
        match self {
            Policy::Fcfs => Box::new(FcfsDispatcher),
            Policy::Sjf => Box::new(SjfDispatcher),
            Policy::Priority => Box::new(PriorityDispatcher),
            Policy::RoundRobin => Box::new(RoundRobinDispatcher::new(config.time_quantum)),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF (non-preemptive)",
            Policy::Priority => "Priority (non-preemptive)",
            Policy::RoundRobin => "Round Robin",
        };
        f.write_str(label)
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fcfs" | "fifo" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "priority" | "ps" => Ok(Policy::Priority),
            "round_robin" | "rr" => Ok(Policy::RoundRobin),
            _ => Err(ConfigError::UnknownPolicy(s.into())),
        }
    }
}

/// Selection strategy driven by the simulation loop.
///
/// The loop calls [`Dispatcher::select_next`] whenever the CPU is free, runs
/// the chosen slot for [`Dispatcher::slice`] time units and then reports back
/// through [`Dispatcher::after_slice`].
pub trait Dispatcher {
    fn policy(&self) -> Policy;

    /// Reorder the workload before the registry is built
    fn arrange(&self, _processes: &mut [ProcessDescriptor]) {}

    /// Next slot to run, or `None` when nothing eligible is waiting.
    /// Only slots with `arrival_time <= now` and remaining time are candidates.
    fn select_next(&mut self, registry: &ProcessRegistry, now: Ticks) -> Option<Slot>;

    /// CPU time granted to `slot` for this dispatch
    fn slice(&self, registry: &ProcessRegistry, slot: Slot) -> Ticks {
        registry.state(slot).remaining_time
    }

    /// Called once the slice finished and the clock sits at `now`.
    /// Returns whether the slot was handed back to the ready queue.
    fn after_slice(&mut self, _registry: &ProcessRegistry, _slot: Slot, _now: Ticks) -> bool {
        false
    }
}

/// Eligible slot minimizing `key`; ties go to the lowest slot
pub(crate) fn min_eligible_by<K, F>(registry: &ProcessRegistry, now: Ticks, key: F) -> Option<Slot>
where
    K: Ord,
    F: Fn(&ProcessDescriptor) -> K,
{
    registry
        .eligible(now)
        .min_by_key(|&slot| (key(registry.descriptor(slot)), slot))
}
