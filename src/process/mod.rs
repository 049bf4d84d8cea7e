/*!
 * Process Module
 * Process descriptors, runtime state, registry and workloads
 */

pub mod registry;
pub mod types;
pub(crate) mod validation;
pub mod workload;

pub use registry::ProcessRegistry;
pub use types::{ProcessDescriptor, ProcessRuntimeState, ProcessState};
pub use workload::demo_processes;
