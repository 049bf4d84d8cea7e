/*!
 * Memory Arbitration
 *
 * A single bounded memory pool shared by every simulated process.
 *
 * ## Model
 *
 * - A process is swapped in once, right before its first dispatch, and stays
 *   resident until it completes (round-robin preemption keeps it resident).
 * - When a process does not fit, completed residents are swapped out in
 *   registry order until it does. Each swap operation costs a fixed amount of
 *   simulated time.
 * - If nothing more can be evicted the process is admitted anyway and the
 *   ledger goes negative (degraded mode), unless strict memory is enabled.
 */

mod arbiter;
mod types;

pub use arbiter::{Admission, MemoryArbiter};
pub use types::{MemoryPressure, MemoryStats};
