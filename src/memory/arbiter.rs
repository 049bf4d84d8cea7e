/*!
 * Memory Arbiter
 * Admission, greedy eviction and swap-time accounting
 */

use super::types::MemoryStats;
use crate::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{MemoryUnits, Slot, Ticks};
use crate::process::ProcessRegistry;
use crate::simulation::events::{EventKind, EventLogEntry};
use tracing::{debug, warn};

/// Memory amount on the signed ledger
fn signed(units: MemoryUnits) -> SimResult<i64> {
    i64::try_from(units).map_err(|_| {
        SimError::invariant(format!("memory amount {} exceeds the ledger range", units))
    })
}

/// Result of admitting a process into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// Clock time consumed by swap-outs and the swap-in
    pub elapsed: Ticks,
    pub events: Vec<EventLogEntry>,
    /// Slots swapped out to make room, in eviction order
    pub evicted: Vec<Slot>,
    /// Admitted although memory stayed insufficient
    pub degraded: bool,
}

/// Sole owner of the memory ledger
#[derive(Debug, Clone)]
pub struct MemoryArbiter {
    total_memory: MemoryUnits,
    available: i64,
    swap_time: Ticks,
    strict: bool,
    swap_ins: u32,
    swap_outs: u32,
}

impl MemoryArbiter {
    pub fn new(config: &SimConfig) -> Self {
        debug!(
            total_memory = config.total_memory,
            swap_time = config.swap_time,
            strict = config.strict_memory,
            "Memory arbiter initialized"
        );
        Self {
            total_memory: config.total_memory,
            // SimConfig::validate bounds the pool to i64::MAX
            available: i64::try_from(config.total_memory).unwrap_or(i64::MAX),
            swap_time: config.swap_time,
            strict: config.strict_memory,
            swap_ins: 0,
            swap_outs: 0,
        }
    }

    pub fn available(&self) -> i64 {
        self.available
    }

    /// Make `slot` resident, evicting completed processes if it does not fit.
    ///
    /// Returns the clock time consumed and the events to log. The caller is
    /// responsible for advancing the clock by `elapsed`.
    pub fn ensure_capacity(
        &mut self,
        slot: Slot,
        now: Ticks,
        registry: &mut ProcessRegistry,
    ) -> SimResult<Admission> {
        let descriptor = registry.descriptor(slot);
        let pid = descriptor.pid;
        let name = descriptor.name.clone();
        let required = descriptor.memory_required;
        let needed = signed(required)?;

        let mut clock = now;
        let mut events = Vec::new();
        let mut evicted = Vec::new();
        let mut degraded = false;

        if self.available < needed {
            events.push(EventLogEntry::new(
                clock,
                EventKind::Shortfall,
                Some(pid),
                format!(
                    "Process {} needs {} but only {} available",
                    name, needed, self.available
                ),
            ));

            let candidates: Vec<Slot> = registry.evictable().collect();
            for victim in candidates {
                let victim_descriptor = registry.descriptor(victim);
                let victim_pid = victim_descriptor.pid;
                let victim_name = victim_descriptor.name.clone();
                let freed = victim_descriptor.memory_required;
                let freed_signed = signed(freed)?;

                clock += self.swap_time;
                registry.evict(victim, clock)?;
                self.available += freed_signed;
                self.swap_outs += 1;
                evicted.push(victim);

                debug!(
                    pid = victim_pid,
                    freed,
                    available = self.available,
                    "Swapped out completed process"
                );
                events.push(EventLogEntry::new(
                    clock,
                    EventKind::SwapOut,
                    Some(victim_pid),
                    format!(
                        "Swapped OUT process {} (freed {}, available: {})",
                        victim_name, freed, self.available
                    ),
                ));

                if self.available >= needed {
                    break;
                }
            }

            if self.available < needed {
                if self.strict {
                    return Err(SimError::MemoryExhausted {
                        pid,
                        required,
                        available: self.available,
                    });
                }

                degraded = true;
                warn!(
                    pid,
                    needed,
                    available = self.available,
                    "Insufficient memory even after swapping, over-committing"
                );
                events.push(EventLogEntry::new(
                    clock,
                    EventKind::Warning,
                    Some(pid),
                    format!(
                        "Insufficient memory even after swapping: {} needs {}, {} available",
                        name, needed, self.available
                    ),
                ));
            }
        }

        clock += self.swap_time;
        registry.mark_swapped_in(slot, clock, self.swap_time)?;
        self.available -= needed;
        self.swap_ins += 1;

        let stats = self.stats(registry);
        debug!(
            pid,
            needed,
            available = self.available,
            pressure = %stats.memory_pressure(),
            "Swapped in process"
        );
        events.push(EventLogEntry::new(
            clock,
            EventKind::SwapIn,
            Some(pid),
            format!(
                "Swapped IN process {} (required: {}, available: {})",
                name, needed, self.available
            ),
        ));

        self.check_conservation(registry)?;

        Ok(Admission {
            elapsed: clock - now,
            events,
            evicted,
            degraded,
        })
    }

    /// Resident memory plus available memory must equal the pool size
    pub fn check_conservation(&self, registry: &ProcessRegistry) -> SimResult<()> {
        let resident = signed(registry.resident_memory())?;
        if resident.checked_add(self.available) != Some(signed(self.total_memory)?) {
            return Err(SimError::invariant(format!(
                "memory ledger out of balance: resident {} + available {} != total {}",
                resident, self.available, self.total_memory
            )));
        }
        Ok(())
    }

    pub fn stats(&self, registry: &ProcessRegistry) -> MemoryStats {
        let resident_memory = registry.resident_memory();
        MemoryStats {
            total_memory: self.total_memory,
            resident_memory,
            available_memory: self.available,
            usage_percentage: (resident_memory as f64 / self.total_memory as f64) * 100.0,
            swap_ins: self.swap_ins,
            swap_outs: self.swap_outs,
        }
    }
}
