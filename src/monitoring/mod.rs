/*!
 * Monitoring
 * Run metrics and structured tracing
 */

mod metrics;
mod tracer;

pub use metrics::Metrics;
pub use tracer::{generate_run_id, init_tracing};
