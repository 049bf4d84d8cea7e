/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{InlineString, MemoryUnits, Pid};
use crate::process::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation operation result
pub type SimResult<T> = Result<T, SimError>;

/// Configuration errors, detected before the simulation starts
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Workload is empty")]
    #[diagnostic(
        code(config::empty_workload),
        help("Supply at least one process descriptor.")
    )]
    EmptyWorkload,

    #[error("Process {0} has a burst time of zero")]
    #[diagnostic(
        code(config::non_positive_burst),
        help("Every process must require at least one unit of CPU time.")
    )]
    NonPositiveBurst(Pid),

    #[error("Process {0} requires zero memory")]
    #[diagnostic(
        code(config::non_positive_memory),
        help("Every process must declare a positive memory requirement.")
    )]
    NonPositiveMemory(Pid),

    #[error("Duplicate process id {0}")]
    #[diagnostic(
        code(config::duplicate_pid),
        help("Process ids identify processes in the event log and must be unique.")
    )]
    DuplicatePid(Pid),

    #[error("Process {0} has no priority rank")]
    #[diagnostic(
        code(config::missing_priority),
        help("The priority policy needs a priority rank on every process.")
    )]
    MissingPriority(Pid),

    #[error("Process {pid} requires {required} units but total memory is {total}")]
    #[diagnostic(
        code(config::exceeds_total_memory),
        help("Strict memory mode cannot admit a process larger than the whole pool.")
    )]
    ExceedsTotalMemory {
        pid: Pid,
        required: MemoryUnits,
        total: MemoryUnits,
    },

    #[error("Total memory {0} exceeds the supported maximum")]
    #[diagnostic(
        code(config::total_memory_out_of_range),
        help("The memory ledger is signed; total memory must not exceed i64::MAX.")
    )]
    TotalMemoryOutOfRange(MemoryUnits),

    #[error("Combined memory demand overflows the ledger at process {0}")]
    #[diagnostic(
        code(config::workload_memory_out_of_range),
        help("The sum of all memory requirements must not exceed i64::MAX.")
    )]
    WorkloadMemoryOutOfRange(Pid),

    #[error("Total memory must be positive")]
    #[diagnostic(code(config::non_positive_total_memory))]
    NonPositiveTotalMemory,

    #[error("Time quantum must be positive")]
    #[diagnostic(
        code(config::non_positive_quantum),
        help("Round-robin needs a quantum of at least one time unit.")
    )]
    NonPositiveQuantum,

    #[error("Invalid value {value:?} for {var}")]
    #[diagnostic(
        code(config::invalid_env),
        help("Numeric settings take unsigned integers; flags take 1/0/true/false.")
    )]
    InvalidEnv {
        var: InlineString,
        value: InlineString,
    },

    #[error("Unknown scheduling policy: {0}")]
    #[diagnostic(
        code(config::unknown_policy),
        help("Use one of: fcfs, sjf, priority, round_robin.")
    )]
    UnknownPolicy(InlineString),

    #[error("Invalid workload description: {0}")]
    #[diagnostic(
        code(config::invalid_workload),
        help("The workload must be a JSON array of process descriptors.")
    )]
    InvalidWorkload(InlineString),
}

/// Errors raised while a simulation is running
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Process {pid} needs {required} units, only {available} available after swapping")]
    #[diagnostic(
        code(sim::memory_exhausted),
        help("Strict memory mode is enabled. Disable it to allow degraded over-commit.")
    )]
    MemoryExhausted {
        pid: Pid,
        required: MemoryUnits,
        available: i64,
    },

    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    #[diagnostic(
        code(sim::invalid_transition),
        help("A process went through an illegal lifecycle step. Please report this issue.")
    )]
    InvalidTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },

    #[error("Invariant violated: {0}")]
    #[diagnostic(
        code(sim::invariant_violation),
        help("An internal simulation invariant does not hold. Please report this issue.")
    )]
    InvariantViolation(InlineString),
}

impl SimError {
    pub(crate) fn invariant(msg: impl AsRef<str>) -> Self {
        SimError::InvariantViolation(msg.as_ref().into())
    }
}
