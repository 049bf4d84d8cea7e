/*!
 * Scheduling Simulator - Main Entry Point
 *
 * Runs a workload under one or every scheduling policy and prints:
 * - The event log
 * - The process execution table and Gantt chart
 * - Performance metrics
 * - A policy comparison
 */

use miette::{IntoDiagnostic, Result};
use sched_sim::core::limits::{ENV_OUTPUT_JSON, ENV_POLICY, ENV_WORKLOAD};
use sched_sim::process::workload;
use sched_sim::{config, report, simulation};
use sched_sim::{demo_processes, init_tracing, Policy, SimConfig};
use std::time::Instant;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let config = SimConfig::from_env()?;

    let processes = match std::env::var(ENV_WORKLOAD) {
        Ok(path) => {
            info!(path = %path, "Loading workload");
            let json = std::fs::read_to_string(&path).into_diagnostic()?;
            workload::from_json_str(&json)?
        }
        Err(_) => demo_processes(),
    };

    let policies = match std::env::var(ENV_POLICY) {
        Ok(name) => vec![name.parse::<Policy>()?],
        Err(_) => Policy::ALL.to_vec(),
    };

    let json_output = match std::env::var(ENV_OUTPUT_JSON) {
        Ok(value) => config::parse_flag(ENV_OUTPUT_JSON, &value)?,
        Err(_) => false,
    };

    info!(
        processes = processes.len(),
        total_memory = config.total_memory,
        swap_time = config.swap_time,
        time_quantum = config.time_quantum,
        "Scheduling simulator starting"
    );

    let mut outcomes = Vec::with_capacity(policies.len());
    for policy in policies {
        let started = Instant::now();
        let outcome = simulation::run(&processes, &config, policy)?;
        let elapsed = started.elapsed();

        if !json_output {
            println!("{}", report::render_event_log(&outcome.events));
            println!("{}", report::render_process_table(&outcome));
            println!("{}", report::render_gantt(&outcome));
            println!("{}", report::render_metrics(&outcome.metrics, elapsed));
        }
        outcomes.push(outcome);
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcomes).into_diagnostic()?);
    } else if outcomes.len() > 1 {
        println!("{}", report::render_comparison(&outcomes));
    }

    Ok(())
}
