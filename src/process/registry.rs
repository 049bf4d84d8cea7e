/*!
 * Process Registry
 * Owns descriptors and runtime state for one simulation run
 */

use super::types::{ProcessDescriptor, ProcessRuntimeState, ProcessState};
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Slot, Ticks};

/// Fixed process population plus its mutable runtime state.
///
/// Slots are positions in the arranged descriptor list and stay stable for
/// the whole run. Every state change goes through a checked transition.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    descriptors: Vec<ProcessDescriptor>,
    states: Vec<ProcessRuntimeState>,
}

impl ProcessRegistry {
    pub fn new(descriptors: Vec<ProcessDescriptor>) -> Self {
        let states = descriptors.iter().map(ProcessRuntimeState::new).collect();
        Self {
            descriptors,
            states,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptor(&self, slot: Slot) -> &ProcessDescriptor {
        &self.descriptors[slot]
    }

    pub fn state(&self, slot: Slot) -> &ProcessRuntimeState {
        &self.states[slot]
    }

    pub fn descriptors(&self) -> &[ProcessDescriptor] {
        &self.descriptors
    }

    pub fn states(&self) -> &[ProcessRuntimeState] {
        &self.states
    }

    /// Arrived and not finished
    pub fn is_eligible(&self, slot: Slot, now: Ticks) -> bool {
        self.descriptors[slot].arrival_time <= now && self.states[slot].remaining_time > 0
    }

    pub fn eligible(&self, now: Ticks) -> impl Iterator<Item = Slot> + '_ {
        (0..self.len()).filter(move |&slot| self.is_eligible(slot, now))
    }

    /// Earliest process that has not arrived by `now`
    pub fn next_arrival(&self, now: Ticks) -> Option<Slot> {
        (0..self.len())
            .filter(|&slot| self.descriptors[slot].arrival_time > now)
            .min_by_key(|&slot| (self.descriptors[slot].arrival_time, slot))
    }

    pub fn all_completed(&self) -> bool {
        self.states.iter().all(ProcessRuntimeState::is_completed)
    }

    /// Completed processes still holding memory, in registry order
    pub fn evictable(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.len()).filter(move |&slot| {
            let state = &self.states[slot];
            state.is_completed() && state.resident && !state.swapped_out
        })
    }

    /// Memory held by resident processes, saturating at `u64::MAX`
    pub fn resident_memory(&self) -> u64 {
        self.descriptors
            .iter()
            .zip(&self.states)
            .filter(|(_, state)| state.resident)
            .map(|(descriptor, _)| descriptor.memory_required)
            .fold(0, u64::saturating_add)
    }

    /// Promote every process whose arrival time has been reached to Ready
    pub fn refresh_arrivals(&mut self, now: Ticks) {
        for (descriptor, state) in self.descriptors.iter().zip(self.states.iter_mut()) {
            if state.state == ProcessState::Unarrived && descriptor.arrival_time <= now {
                state.state = ProcessState::Ready;
            }
        }
    }

    fn transition(&mut self, slot: Slot, from: ProcessState, to: ProcessState) -> SimResult<()> {
        let state = &mut self.states[slot];
        if state.state != from {
            return Err(SimError::InvalidTransition {
                pid: state.pid,
                from: state.state,
                to,
            });
        }
        state.state = to;
        Ok(())
    }

    /// Ready -> Running; records start and response time on the first dispatch
    pub fn begin_dispatch(&mut self, slot: Slot, now: Ticks) -> SimResult<()> {
        self.transition(slot, ProcessState::Ready, ProcessState::Running)?;

        let arrival = self.descriptors[slot].arrival_time;
        let state = &mut self.states[slot];
        state.dispatch_count += 1;
        if state.start_time.is_none() {
            let response = now.checked_sub(arrival).ok_or_else(|| {
                SimError::invariant(format!(
                    "process {} dispatched at {} before arriving at {}",
                    state.pid, now, arrival
                ))
            })?;
            state.start_time = Some(now);
            state.response_time = Some(response);
        }
        Ok(())
    }

    /// Consume CPU time from a running process
    pub fn execute(&mut self, slot: Slot, duration: Ticks) -> SimResult<()> {
        let state = &mut self.states[slot];
        if state.state != ProcessState::Running {
            return Err(SimError::invariant(format!(
                "process {} executed while {:?}",
                state.pid, state.state
            )));
        }
        state.remaining_time = state.remaining_time.checked_sub(duration).ok_or_else(|| {
            SimError::invariant(format!(
                "process {} executed for {} with only {} remaining",
                state.pid, duration, state.remaining_time
            ))
        })?;
        Ok(())
    }

    /// Running -> Ready after a quantum expired
    pub fn preempt(&mut self, slot: Slot) -> SimResult<()> {
        if self.states[slot].remaining_time == 0 {
            return Err(SimError::invariant(format!(
                "process {} preempted with no remaining time",
                self.states[slot].pid
            )));
        }
        self.transition(slot, ProcessState::Running, ProcessState::Ready)
    }

    /// Running -> Completed; derives completion, turnaround and waiting time
    pub fn complete(&mut self, slot: Slot, now: Ticks) -> SimResult<()> {
        if self.states[slot].remaining_time != 0 {
            return Err(SimError::invariant(format!(
                "process {} completed with {} remaining",
                self.states[slot].pid, self.states[slot].remaining_time
            )));
        }
        self.transition(slot, ProcessState::Running, ProcessState::Completed)?;

        let descriptor = &self.descriptors[slot];
        let state = &mut self.states[slot];
        let turnaround = now.checked_sub(descriptor.arrival_time).ok_or_else(|| {
            SimError::invariant(format!("process {} completed before arriving", state.pid))
        })?;
        let waiting = turnaround.checked_sub(descriptor.burst_time).ok_or_else(|| {
            SimError::invariant(format!(
                "process {} turnaround {} shorter than burst {}",
                state.pid, turnaround, descriptor.burst_time
            ))
        })?;

        state.completion_time = Some(now);
        state.turnaround_time = Some(turnaround);
        state.waiting_time = Some(waiting);
        Ok(())
    }

    /// Record a swap-in: the process's memory now counts against the ledger
    pub fn mark_swapped_in(&mut self, slot: Slot, at: Ticks, cost: Ticks) -> SimResult<()> {
        let state = &mut self.states[slot];
        if state.resident || state.swapped_out {
            return Err(SimError::invariant(format!(
                "process {} swapped in twice",
                state.pid
            )));
        }
        state.resident = true;
        state.swap_in_at = Some(at);
        state.total_swap_time += cost;
        Ok(())
    }

    /// Record an eviction. Only completed, resident processes qualify.
    pub fn evict(&mut self, slot: Slot, at: Ticks) -> SimResult<()> {
        let state = &mut self.states[slot];
        if state.swapped_out {
            return Err(SimError::invariant(format!(
                "process {} evicted twice",
                state.pid
            )));
        }
        if !state.is_completed() || !state.resident {
            return Err(SimError::invariant(format!(
                "process {} evicted while {:?} (resident: {})",
                state.pid, state.state, state.resident
            )));
        }
        state.swapped_out = true;
        state.resident = false;
        state.swap_out_at = Some(at);
        Ok(())
    }

    pub fn into_parts(self) -> (Vec<ProcessDescriptor>, Vec<ProcessRuntimeState>) {
        (self.descriptors, self.states)
    }
}
