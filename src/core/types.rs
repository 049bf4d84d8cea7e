/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (the workload's own numbering)
pub type Pid = u32;

/// Index of a process inside the registry (arrangement order)
pub type Slot = usize;

/// Simulated time, in abstract time units
pub type Ticks = u64;

/// Memory amount, in the workload's units (MB in the demo dataset)
pub type MemoryUnits = u64;

/// Priority rank (lower value = scheduled earlier)
pub type Priority = u32;

/// Inline-optimized string for short labels such as process names
pub type InlineString = smartstring::alias::String;
