/*!
 * Workload Validation
 * Configuration-time checks on process descriptors
 */

use super::types::ProcessDescriptor;
use crate::config::SimConfig;
use crate::core::errors::ConfigError;
use crate::core::types::MemoryUnits;
use crate::scheduler::Policy;
use std::collections::HashSet;

/// Reject workloads the engine cannot simulate
pub(crate) fn validate_workload(
    processes: &[ProcessDescriptor],
    config: &SimConfig,
    policy: Policy,
) -> Result<(), ConfigError> {
    if processes.is_empty() {
        return Err(ConfigError::EmptyWorkload);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    let mut demand: MemoryUnits = 0;
    for process in processes {
        if !seen.insert(process.pid) {
            return Err(ConfigError::DuplicatePid(process.pid));
        }
        if process.burst_time == 0 {
            return Err(ConfigError::NonPositiveBurst(process.pid));
        }
        if process.memory_required == 0 {
            return Err(ConfigError::NonPositiveMemory(process.pid));
        }
        if policy == Policy::Priority && process.priority.is_none() {
            return Err(ConfigError::MissingPriority(process.pid));
        }
        if config.strict_memory && process.memory_required > config.total_memory {
            return Err(ConfigError::ExceedsTotalMemory {
                pid: process.pid,
                required: process.memory_required,
                total: config.total_memory,
            });
        }

        // Resident sums and the signed ledger must stay representable
        demand = demand
            .checked_add(process.memory_required)
            .filter(|&sum| i64::try_from(sum).is_ok())
            .ok_or(ConfigError::WorkloadMemoryOutOfRange(process.pid))?;
    }

    Ok(())
}
