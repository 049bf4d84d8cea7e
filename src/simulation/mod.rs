/*!
 * Simulation
 * Entry points for running a workload under one or more policies
 */

pub mod clock;
mod engine;
pub mod events;

pub use clock::SimulationClock;
pub use events::{EventKind, EventLog, EventLogEntry, ExecutionSegment};

use crate::config::SimConfig;
use crate::core::errors::SimResult;
use crate::memory::MemoryStats;
use crate::monitoring::{generate_run_id, Metrics};
use crate::process::validation::validate_workload;
use crate::process::{ProcessDescriptor, ProcessRuntimeState};
use crate::scheduler::Policy;
use engine::Engine;
use serde::Serialize;
use tracing::info_span;

/// Everything one run produced
///
/// `processes` and `states` are index-aligned and follow the order the policy
/// arranged the workload in (arrival order for FCFS, input order otherwise).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub policy: Policy,
    pub config: SimConfig,
    pub processes: Vec<ProcessDescriptor>,
    pub states: Vec<ProcessRuntimeState>,
    pub events: Vec<EventLogEntry>,
    pub timeline: Vec<ExecutionSegment>,
    pub metrics: Metrics,
    /// Ledger at the end of the run
    pub memory: MemoryStats,
}

impl SimulationOutcome {
    /// Descriptor and final state pairs
    pub fn iter(&self) -> impl Iterator<Item = (&ProcessDescriptor, &ProcessRuntimeState)> {
        self.processes.iter().zip(&self.states)
    }

    pub fn state_of(&self, pid: crate::core::types::Pid) -> Option<&ProcessRuntimeState> {
        self.states.iter().find(|state| state.pid == pid)
    }
}

/// Simulate `processes` under `policy`.
///
/// The input slice is never mutated; each run works on its own copy, so the
/// same workload can be replayed under every policy.
pub fn run(
    processes: &[ProcessDescriptor],
    config: &SimConfig,
    policy: Policy,
) -> SimResult<SimulationOutcome> {
    config.validate()?;
    validate_workload(processes, config, policy)?;

    let run_id = generate_run_id();
    let span = info_span!("simulation", run_id = %run_id, policy = %policy);
    let _guard = span.enter();

    Engine::new(processes.to_vec(), config, policy).run()
}

/// Run the same workload under each policy in turn
pub fn compare(
    processes: &[ProcessDescriptor],
    config: &SimConfig,
    policies: &[Policy],
) -> SimResult<Vec<SimulationOutcome>> {
    policies
        .iter()
        .map(|&policy| run(processes, config, policy))
        .collect()
}
