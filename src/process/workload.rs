/*!
 * Workload Sources
 * The built-in demo dataset and JSON workload parsing
 */

use super::types::ProcessDescriptor;
use crate::core::errors::ConfigError;

/// The ten canonical demo processes: a mix of long batch jobs and short,
/// latency-sensitive requests competing for a 6000-unit memory pool.
pub fn demo_processes() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::new(1, "P1", 0, 5, 2500)
            .with_category("Batch Analytics")
            .with_priority(5),
        ProcessDescriptor::new(2, "P2", 1, 3, 512)
            .with_category("Web Request (critical)")
            .with_priority(1),
        ProcessDescriptor::new(3, "P3", 2, 8, 3200)
            .with_category("Batch Analytics (long-running)")
            .with_priority(5),
        ProcessDescriptor::new(4, "P4", 1, 2, 256)
            .with_category("Web Request (short)")
            .with_priority(1),
        ProcessDescriptor::new(5, "P5", 3, 4, 1024)
            .with_category("Database Query")
            .with_priority(3),
        ProcessDescriptor::new(6, "P6", 5, 1, 128)
            .with_category("Web Request (quick)")
            .with_priority(1),
        ProcessDescriptor::new(7, "P7", 4, 2, 384)
            .with_category("Web Request")
            .with_priority(2),
        ProcessDescriptor::new(8, "P8", 4, 2, 448)
            .with_category("API Request")
            .with_priority(2),
        ProcessDescriptor::new(9, "P9", 7, 6, 1800)
            .with_category("Report Generation")
            .with_priority(4),
        ProcessDescriptor::new(10, "P10", 6, 5, 1200)
            .with_category("Data Processing")
            .with_priority(3),
    ]
}

/// Parse a JSON array of process descriptors
pub fn from_json_str(json: &str) -> Result<Vec<ProcessDescriptor>, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::InvalidWorkload(e.to_string().into()))
}
