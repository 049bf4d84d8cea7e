/*!
 * Invariant Tests
 * Property tests over random workloads and configurations
 */

use proptest::prelude::*;
use sched_sim::{run, EventKind, Policy, ProcessDescriptor, ProcessState, SimConfig};

fn workload_strategy() -> impl Strategy<Value = Vec<ProcessDescriptor>> {
    prop::collection::vec((0u64..20, 1u64..10, 1u64..3000, 1u32..6), 1..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, memory, priority))| {
                let pid = i as u32 + 1;
                ProcessDescriptor::new(pid, &format!("P{}", pid), arrival, burst, memory)
                    .with_priority(priority)
            })
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = SimConfig> {
    (1000u64..6000, 0u64..4, 1u64..6).prop_map(|(memory, swap, quantum)| {
        SimConfig::default()
            .with_total_memory(memory)
            .with_swap_time(swap)
            .with_time_quantum(quantum)
    })
}

fn policy_strategy() -> impl Strategy<Value = Policy> {
    prop::sample::select(Policy::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_every_run_upholds_timing_invariants(
        workload in workload_strategy(),
        config in config_strategy(),
        policy in policy_strategy(),
    ) {
        let outcome = run(&workload, &config, policy).unwrap();
        let m = &outcome.metrics;

        for (process, state) in outcome.iter() {
            prop_assert_eq!(state.state, ProcessState::Completed);
            prop_assert_eq!(state.remaining_time, 0);

            let start = state.start_time.unwrap();
            let completion = state.completion_time.unwrap();
            let turnaround = state.turnaround_time.unwrap();
            prop_assert!(start >= process.arrival_time);
            prop_assert!(completion >= start + process.burst_time);
            prop_assert_eq!(turnaround, completion - process.arrival_time);
            prop_assert_eq!(state.waiting_time.unwrap(), turnaround - process.burst_time);
            prop_assert_eq!(state.response_time.unwrap(), start - process.arrival_time);

            let executed: u64 = outcome
                .timeline
                .iter()
                .filter(|s| s.pid == process.pid)
                .map(|s| s.duration())
                .sum();
            prop_assert_eq!(executed, process.burst_time);
        }

        // One CPU: segments never overlap
        for pair in outcome.timeline.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for pair in outcome.events.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }

        prop_assert!(m.cpu_utilization <= 100.0 + 1e-9);
        prop_assert!((m.throughput * m.makespan as f64 - workload.len() as f64).abs() < 1e-9);
        prop_assert_eq!(
            outcome.memory.resident_memory as i64 + outcome.memory.available_memory,
            config.total_memory as i64
        );
    }

    #[test]
    fn prop_evictions_follow_completion(
        workload in workload_strategy(),
        config in config_strategy(),
        policy in policy_strategy(),
    ) {
        let outcome = run(&workload, &config, policy).unwrap();

        let mut seen = std::collections::HashSet::new();
        for event in outcome.events.iter().filter(|e| e.kind == EventKind::SwapOut) {
            let pid = event.pid.unwrap();
            prop_assert!(seen.insert(pid), "process {} evicted twice", pid);
            let completion = outcome.state_of(pid).unwrap().completion_time.unwrap();
            prop_assert!(completion <= event.timestamp);
        }
        prop_assert_eq!(seen.len(), outcome.metrics.swapped_out_count);
    }
}
