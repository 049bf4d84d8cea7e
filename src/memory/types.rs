/*!
 * Memory Types
 * Ledger snapshots and pressure levels for the simulated memory pool
 */

use crate::core::types::MemoryUnits;
use serde::{Deserialize, Serialize};

/// Memory ledger snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: MemoryUnits,
    pub resident_memory: MemoryUnits,
    /// Negative while over-committed
    pub available_memory: i64,
    pub usage_percentage: f64,
    pub swap_ins: u32,
    pub swap_outs: u32,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        if self.available_memory < 0 {
            MemoryPressure::Overcommitted
        } else if self.usage_percentage >= 95.0 {
            MemoryPressure::Critical
        } else if self.usage_percentage >= 80.0 {
            MemoryPressure::High
        } else if self.usage_percentage >= 60.0 {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
    Overcommitted,
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
            MemoryPressure::Overcommitted => write!(f, "OVERCOMMITTED"),
        }
    }
}
