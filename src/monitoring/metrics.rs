/*!
 * Simulation Metrics
 * Aggregate scheduling statistics derived from final process states
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::limits::UTILIZATION_EPSILON;
use crate::core::types::Ticks;
use crate::process::{ProcessDescriptor, ProcessRuntimeState};
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one completed run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Metrics {
    pub process_count: usize,
    /// Latest completion time
    pub makespan: Ticks,
    pub total_burst_time: Ticks,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    /// Processes per time unit
    pub throughput: f64,
    /// Burst time over makespan, in percent
    pub cpu_utilization: f64,
    /// Swap-in time charged to processes
    pub total_swap_time: Ticks,
    /// Processes evicted after completion
    pub swapped_out_count: usize,
    /// Swap-ins plus swap-outs
    pub swap_operations: u64,
    /// Clock time spent on all swap operations
    pub swap_overhead: Ticks,
    pub context_switches: u64,
}

impl Metrics {
    /// Derive run metrics. Every process must be completed.
    pub fn aggregate(
        descriptors: &[ProcessDescriptor],
        states: &[ProcessRuntimeState],
        swap_time: Ticks,
    ) -> SimResult<Self> {
        let n = states.len();
        if n == 0 {
            return Ok(Self::default());
        }

        let mut total_waiting: Ticks = 0;
        let mut total_turnaround: Ticks = 0;
        let mut total_response: Ticks = 0;
        let mut makespan: Ticks = 0;
        let mut dispatches: u64 = 0;
        let mut swap_ins: u64 = 0;
        let mut metrics = Self {
            process_count: n,
            ..Self::default()
        };

        for (descriptor, state) in descriptors.iter().zip(states) {
            let (Some(completion), Some(turnaround), Some(waiting), Some(response)) = (
                state.completion_time,
                state.turnaround_time,
                state.waiting_time,
                state.response_time,
            ) else {
                return Err(SimError::invariant(format!(
                    "process {} has no final timings",
                    state.pid
                )));
            };

            makespan = makespan.max(completion);
            total_waiting += waiting;
            total_turnaround += turnaround;
            total_response += response;
            metrics.total_burst_time += descriptor.burst_time;
            metrics.total_swap_time += state.total_swap_time;
            dispatches += u64::from(state.dispatch_count);
            if state.swap_in_at.is_some() {
                swap_ins += 1;
            }
            if state.swapped_out {
                metrics.swapped_out_count += 1;
            }
        }

        let count = n as f64;
        metrics.makespan = makespan;
        metrics.average_waiting_time = total_waiting as f64 / count;
        metrics.average_turnaround_time = total_turnaround as f64 / count;
        metrics.average_response_time = total_response as f64 / count;
        metrics.swap_operations = swap_ins + metrics.swapped_out_count as u64;
        metrics.swap_overhead = metrics.swap_operations * swap_time;
        metrics.context_switches = dispatches.saturating_sub(1);

        if makespan > 0 {
            metrics.throughput = count / makespan as f64;
            metrics.cpu_utilization = metrics.total_burst_time as f64 * 100.0 / makespan as f64;
        }

        if metrics.cpu_utilization > 100.0 + UTILIZATION_EPSILON {
            return Err(SimError::invariant(format!(
                "CPU utilization {:.2}% exceeds 100%",
                metrics.cpu_utilization
            )));
        }

        Ok(metrics)
    }
}
