/*!
 * Reports
 * Plain-text renderers for simulation outcomes
 */

use crate::core::types::{Pid, Ticks};
use crate::monitoring::Metrics;
use crate::simulation::{EventLogEntry, SimulationOutcome};
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::time::Duration;

const RULE_WIDTH: usize = 100;

fn render(body: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = body(&mut out);
    out
}

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn opt(value: Option<Ticks>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// One line per event: `[t=  12] SWAP-IN       Swapped IN process P3 ...`
pub fn render_event_log(events: &[EventLogEntry]) -> String {
    render(|out| {
        heading(out, "EVENT LOG")?;
        for event in events {
            writeln!(
                out,
                "[t={:>4}] {:<13} {}",
                event.timestamp,
                event.kind.to_string(),
                event.detail
            )?;
        }
        Ok(())
    })
}

/// Per-process results table
pub fn render_process_table(outcome: &SimulationOutcome) -> String {
    render(|out| {
        heading(out, &format!("PROCESS EXECUTION TABLE - {}", outcome.policy))?;
        writeln!(
            out,
            "{:<5} {:<32} {:>7} {:>5} {:>8} {:>6} {:>5} {:>5} {:>6} {:>5} {:>5} {:>5} {:>8}",
            "Name",
            "Category",
            "Arrive",
            "Burst",
            "Priority",
            "Memory",
            "Start",
            "End",
            "Turn",
            "Wait",
            "Resp",
            "Swap",
            "Evicted"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for (process, state) in outcome.iter() {
            writeln!(
                out,
                "{:<5} {:<32} {:>7} {:>5} {:>8} {:>6} {:>5} {:>5} {:>6} {:>5} {:>5} {:>5} {:>8}",
                process.name.as_str(),
                process.category.as_str(),
                process.arrival_time,
                process.burst_time,
                process
                    .priority
                    .map_or_else(|| "-".to_string(), |p| p.to_string()),
                process.memory_required,
                opt(state.start_time),
                opt(state.completion_time),
                opt(state.turnaround_time),
                opt(state.waiting_time),
                opt(state.response_time),
                state.total_swap_time,
                if state.swapped_out { "yes" } else { "no" }
            )?;
        }
        Ok(())
    })
}

/// Gantt chart built from the execution timeline.
///
/// Every dispatch becomes its own cell, so preempted processes show up once
/// per slice. Gaps where the CPU did not execute (idle or swapping) are drawn
/// as `--` cells.
pub fn render_gantt(outcome: &SimulationOutcome) -> String {
    let names: HashMap<Pid, &str> = outcome
        .processes
        .iter()
        .map(|p| (p.pid, p.name.as_str()))
        .collect();

    let mut cells: Vec<(String, Ticks)> = Vec::with_capacity(outcome.timeline.len() * 2);
    let mut cursor: Ticks = 0;
    for segment in &outcome.timeline {
        if segment.start > cursor {
            cells.push(("--".to_string(), segment.start));
        }
        let label = names
            .get(&segment.pid)
            .map_or_else(|| segment.pid.to_string(), |name| name.to_string());
        cells.push((label, segment.end));
        cursor = segment.end;
    }

    render(|out| {
        heading(out, &format!("GANTT CHART - {}", outcome.policy))?;

        let mut bar = String::from("|");
        let mut axis = String::from("0");
        for (label, end) in &cells {
            let width = label.len().max(end.to_string().len()) + 2;
            write!(bar, "{:^width$}|", label, width = width)?;
            write!(axis, "{:>width$}", end, width = width + 1)?;
        }
        writeln!(out, "{}", bar)?;
        writeln!(out, "{}", axis)
    })
}

/// Aggregate metrics block; `elapsed` is the wall-clock time of the run
pub fn render_metrics(metrics: &Metrics, elapsed: Duration) -> String {
    render(|out| {
        heading(out, "PERFORMANCE METRICS")?;
        writeln!(out, "Processes:                {}", metrics.process_count)?;
        writeln!(out, "Makespan:                 {}", metrics.makespan)?;
        writeln!(out, "Total burst time:         {}", metrics.total_burst_time)?;
        writeln!(out, "Average waiting time:     {:.2}", metrics.average_waiting_time)?;
        writeln!(out, "Average turnaround time:  {:.2}", metrics.average_turnaround_time)?;
        writeln!(out, "Average response time:    {:.2}", metrics.average_response_time)?;
        writeln!(out, "Throughput:               {:.4} processes/unit", metrics.throughput)?;
        writeln!(out, "CPU utilization:          {:.2}%", metrics.cpu_utilization)?;
        writeln!(out, "Context switches:         {}", metrics.context_switches)?;
        writeln!(out, "Swap time (swap-ins):     {}", metrics.total_swap_time)?;
        writeln!(out, "Processes swapped out:    {}", metrics.swapped_out_count)?;
        writeln!(
            out,
            "Swap operations:          {} ({} time units)",
            metrics.swap_operations, metrics.swap_overhead
        )?;
        writeln!(out, "Execution time:           {:.3} ms", elapsed.as_secs_f64() * 1000.0)
    })
}

/// Side-by-side comparison of several runs of the same workload
pub fn render_comparison(outcomes: &[SimulationOutcome]) -> String {
    render(|out| {
        heading(out, "POLICY COMPARISON")?;
        writeln!(
            out,
            "{:<26} {:>9} {:>11} {:>9} {:>11} {:>9} {:>9} {:>6}",
            "Policy", "Avg Wait", "Avg Turn", "Avg Resp", "Throughput", "CPU %", "Makespan", "Swaps"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for outcome in outcomes {
            let m = &outcome.metrics;
            writeln!(
                out,
                "{:<26} {:>9.2} {:>11.2} {:>9.2} {:>11.4} {:>9.2} {:>9} {:>6}",
                outcome.policy.to_string(),
                m.average_waiting_time,
                m.average_turnaround_time,
                m.average_response_time,
                m.throughput,
                m.cpu_utilization,
                m.makespan,
                m.swap_operations
            )?;
        }

        let best = outcomes.iter().min_by(|a, b| {
            a.metrics
                .average_waiting_time
                .total_cmp(&b.metrics.average_waiting_time)
        });
        if let Some(best) = best {
            writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
            writeln!(
                out,
                "Lowest average waiting time: {} ({:.2})",
                best.policy, best.metrics.average_waiting_time
            )?;
        }
        Ok(())
    })
}
