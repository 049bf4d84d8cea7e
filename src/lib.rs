/*!
 * Scheduling Simulator Library
 * Memory-constrained CPU scheduling simulation exposed as a library
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use config::SimConfig;
pub use crate::core::errors::{ConfigError, SimError, SimResult};
pub use memory::{MemoryPressure, MemoryStats};
pub use monitoring::{init_tracing, Metrics};
pub use process::{
    demo_processes, ProcessDescriptor, ProcessRegistry, ProcessRuntimeState, ProcessState,
};
pub use scheduler::{Dispatcher, Policy};
pub use simulation::{compare, run, EventKind, EventLogEntry, ExecutionSegment, SimulationOutcome};
