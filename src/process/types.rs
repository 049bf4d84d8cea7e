/*!
 * Process Types
 * Descriptors and per-run runtime state for simulated processes
 */

use crate::core::types::{InlineString, MemoryUnits, Pid, Priority, Ticks};
use serde::{Deserialize, Serialize};

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Arrival time not reached yet
    Unarrived,
    /// Arrived and waiting for the CPU
    Ready,
    /// Currently executing
    Running,
    /// Finished its whole burst
    Completed,
}

/// Immutable description of a process, as supplied by the workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessDescriptor {
    pub pid: Pid,
    pub name: InlineString,
    #[serde(default)]
    pub category: InlineString,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub memory_required: MemoryUnits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ProcessDescriptor {
    pub fn new(
        pid: Pid,
        name: &str,
        arrival_time: Ticks,
        burst_time: Ticks,
        memory_required: MemoryUnits,
    ) -> Self {
        Self {
            pid,
            name: name.into(),
            category: InlineString::new(),
            arrival_time,
            burst_time,
            memory_required,
            priority: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Mutable per-run state of one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRuntimeState {
    pub pid: Pid,
    pub state: ProcessState,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
    /// Swap-in time charged to this process
    pub total_swap_time: Ticks,
    /// Memory currently counted against the ledger
    pub resident: bool,
    /// Evicted after completion
    pub swapped_out: bool,
    pub swap_in_at: Option<Ticks>,
    pub swap_out_at: Option<Ticks>,
    pub dispatch_count: u32,
}

impl ProcessRuntimeState {
    pub fn new(descriptor: &ProcessDescriptor) -> Self {
        Self {
            pid: descriptor.pid,
            state: ProcessState::Unarrived,
            remaining_time: descriptor.burst_time,
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            response_time: None,
            total_swap_time: 0,
            resident: false,
            swapped_out: false,
            swap_in_at: None,
            swap_out_at: None,
            dispatch_count: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }
}
