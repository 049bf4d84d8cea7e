/*!
 * Simulation Configuration
 * Memory pool, swap cost and quantum settings with env overrides
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_SWAP_TIME, DEFAULT_TIME_QUANTUM, DEFAULT_TOTAL_MEMORY, ENV_STRICT_MEMORY,
    ENV_SWAP_TIME, ENV_TIME_QUANTUM, ENV_TOTAL_MEMORY,
};
use crate::core::types::{MemoryUnits, Ticks};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scalar configuration for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimConfig {
    pub total_memory: MemoryUnits,
    /// Cost of each swap-in and swap-out
    pub swap_time: Ticks,
    /// Round-robin quantum; ignored by the other policies
    pub time_quantum: Ticks,
    /// Fail instead of over-committing memory
    pub strict_memory: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_memory: DEFAULT_TOTAL_MEMORY,
            swap_time: DEFAULT_SWAP_TIME,
            time_quantum: DEFAULT_TIME_QUANTUM,
            strict_memory: false,
        }
    }
}

impl SimConfig {
    pub fn with_total_memory(mut self, total_memory: MemoryUnits) -> Self {
        self.total_memory = total_memory;
        self
    }

    pub fn with_swap_time(mut self, swap_time: Ticks) -> Self {
        self.swap_time = swap_time;
        self
    }

    pub fn with_time_quantum(mut self, time_quantum: Ticks) -> Self {
        self.time_quantum = time_quantum;
        self
    }

    pub fn with_strict_memory(mut self, strict: bool) -> Self {
        self.strict_memory = strict;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_memory == 0 {
            return Err(ConfigError::NonPositiveTotalMemory);
        }
        if i64::try_from(self.total_memory).is_err() {
            return Err(ConfigError::TotalMemoryOutOfRange(self.total_memory));
        }
        if self.time_quantum == 0 {
            return Err(ConfigError::NonPositiveQuantum);
        }
        Ok(())
    }

    /// Defaults overridden by the process environment
    ///
    /// Environment variables:
    /// - SIM_TOTAL_MEMORY: memory pool size (default: 6000)
    /// - SIM_SWAP_TIME: cost per swap operation (default: 2)
    /// - SIM_TIME_QUANTUM: round-robin quantum (default: 3)
    /// - SIM_STRICT_MEMORY: fail on memory exhaustion (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`SimConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_TOTAL_MEMORY) {
            config.total_memory = parse_var(ENV_TOTAL_MEMORY, &value)?;
        }
        if let Some(value) = lookup(ENV_SWAP_TIME) {
            config.swap_time = parse_var(ENV_SWAP_TIME, &value)?;
        }
        if let Some(value) = lookup(ENV_TIME_QUANTUM) {
            config.time_quantum = parse_var(ENV_TIME_QUANTUM, &value)?;
        }
        if let Some(value) = lookup(ENV_STRICT_MEMORY) {
            config.strict_memory = parse_flag(ENV_STRICT_MEMORY, &value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.into(),
        value: value.into(),
    })
}

/// Parse a boolean environment flag
pub fn parse_flag(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.into(),
            value: value.into(),
        }),
    }
}
