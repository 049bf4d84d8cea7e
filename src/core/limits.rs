/*!
 * Simulation Limits and Constants
 *
 * Default configuration values and fixed costs used by the engine.
 */

use super::types::{MemoryUnits, Ticks};

// =============================================================================
// MEMORY
// =============================================================================

/// Default size of the simulated memory pool
pub const DEFAULT_TOTAL_MEMORY: MemoryUnits = 6000;

/// Default cost of a single swap-in or swap-out, in time units
pub const DEFAULT_SWAP_TIME: Ticks = 2;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Default round-robin time quantum
pub const DEFAULT_TIME_QUANTUM: Ticks = 3;

/// Clock advance while the CPU has nothing eligible to run
pub const IDLE_TICK: Ticks = 1;

// =============================================================================
// METRICS
// =============================================================================

/// Tolerance when checking utilization against 100%
pub const UTILIZATION_EPSILON: f64 = 1e-9;

// =============================================================================
// ENVIRONMENT
// =============================================================================

pub const ENV_TOTAL_MEMORY: &str = "SIM_TOTAL_MEMORY";
pub const ENV_SWAP_TIME: &str = "SIM_SWAP_TIME";
pub const ENV_TIME_QUANTUM: &str = "SIM_TIME_QUANTUM";
pub const ENV_STRICT_MEMORY: &str = "SIM_STRICT_MEMORY";
pub const ENV_POLICY: &str = "SIM_POLICY";
pub const ENV_WORKLOAD: &str = "SIM_WORKLOAD";
pub const ENV_OUTPUT_JSON: &str = "SIM_OUTPUT_JSON";
pub const ENV_TRACE_JSON: &str = "SIM_TRACE_JSON";
