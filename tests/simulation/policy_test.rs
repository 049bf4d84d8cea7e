/*!
 * Policy Tests
 * End-to-end runs of every policy on the demo workload
 */

use pretty_assertions::assert_eq;
use sched_sim::{
    demo_processes, run, EventKind, Policy, ProcessDescriptor, SimConfig, SimulationOutcome,
};

fn demo(policy: Policy) -> SimulationOutcome {
    run(&demo_processes(), &SimConfig::default(), policy).unwrap()
}

fn dispatch_order(outcome: &SimulationOutcome) -> Vec<u32> {
    outcome.timeline.iter().map(|s| s.pid).collect()
}

fn completion(outcome: &SimulationOutcome, pid: u32) -> u64 {
    outcome.state_of(pid).unwrap().completion_time.unwrap()
}

#[test]
fn test_fcfs_demo_schedule() {
    let outcome = demo(Policy::Fcfs);

    // Registry follows arrival order, ties in input order
    let pids: Vec<u32> = outcome.processes.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![1, 2, 4, 3, 5, 7, 8, 6, 10, 9]);
    assert_eq!(dispatch_order(&outcome), pids);

    let completions: Vec<u64> = pids.iter().map(|&pid| completion(&outcome, pid)).collect();
    assert_eq!(completions, vec![7, 12, 16, 28, 34, 38, 42, 45, 58, 66]);

    let waits: Vec<u64> = outcome
        .states
        .iter()
        .map(|s| s.waiting_time.unwrap())
        .collect();
    assert_eq!(waits, vec![2, 8, 13, 18, 27, 32, 36, 39, 47, 53]);

    let m = &outcome.metrics;
    assert_eq!(m.makespan, 66);
    assert_eq!(m.total_burst_time, 38);
    assert_eq!(m.average_waiting_time, 27.5);
    assert_eq!(m.average_turnaround_time, 31.3);
    assert_eq!(m.average_response_time, 27.5);
    assert_eq!(m.swapped_out_count, 4);
    assert_eq!(m.swap_operations, 14);
    assert_eq!(m.swap_overhead, 28);
    assert_eq!(m.total_swap_time, 20);
    assert_eq!(m.context_switches, 9);
    assert!((m.cpu_utilization - 3800.0 / 66.0).abs() < 1e-9);
}

#[test]
fn test_runs_are_deterministic() {
    for policy in Policy::ALL {
        let a = serde_json::to_string(&demo(policy)).unwrap();
        let b = serde_json::to_string(&demo(policy)).unwrap();
        assert_eq!(a, b, "{} diverged between runs", policy);
    }
}

#[test]
fn test_sjf_demo_schedule() {
    let outcome = demo(Policy::Sjf);
    assert_eq!(dispatch_order(&outcome), vec![1, 6, 4, 7, 8, 2, 5, 10, 9, 3]);

    let completions: Vec<u64> = [1, 6, 4, 7, 8, 2, 5, 10, 9, 3]
        .iter()
        .map(|&pid| completion(&outcome, pid))
        .collect();
    assert_eq!(completions, vec![7, 10, 14, 18, 22, 27, 33, 42, 50, 74]);
    assert_eq!(outcome.metrics.makespan, 74);
    assert_eq!(outcome.metrics.average_waiting_time, 22.6);
}

#[test]
fn test_sjf_tie_breaks_on_arrival_then_input_order() {
    let workload = vec![
        ProcessDescriptor::new(1, "long", 0, 9, 10),
        ProcessDescriptor::new(2, "late", 3, 2, 10),
        ProcessDescriptor::new(3, "early", 1, 2, 10),
        ProcessDescriptor::new(4, "twin", 1, 2, 10),
    ];
    let outcome = run(&workload, &SimConfig::default(), Policy::Sjf).unwrap();
    assert_eq!(dispatch_order(&outcome), vec![1, 3, 4, 2]);
}

#[test]
fn test_priority_demo_schedule() {
    let outcome = demo(Policy::Priority);
    assert_eq!(dispatch_order(&outcome), vec![1, 6, 4, 2, 7, 8, 5, 10, 9, 3]);
    assert_eq!(completion(&outcome, 2), 19);
    assert_eq!(completion(&outcome, 3), 74);
    assert_eq!(outcome.metrics.average_waiting_time, 22.8);
}

#[test]
fn test_priority_tie_breaks_on_burst() {
    let workload = vec![
        ProcessDescriptor::new(1, "a", 0, 5, 10).with_priority(2),
        ProcessDescriptor::new(2, "b", 0, 3, 10).with_priority(2),
        ProcessDescriptor::new(3, "c", 0, 3, 10).with_priority(2),
        ProcessDescriptor::new(4, "d", 0, 9, 10).with_priority(1),
    ];
    let outcome = run(&workload, &SimConfig::default(), Policy::Priority).unwrap();
    assert_eq!(dispatch_order(&outcome), vec![4, 2, 3, 1]);
}

#[test]
fn test_round_robin_demo_schedule() {
    let outcome = demo(Policy::RoundRobin);
    assert_eq!(
        dispatch_order(&outcome),
        vec![1, 2, 4, 3, 5, 7, 8, 6, 1, 10, 9, 3, 5, 10, 9, 3]
    );
    assert_eq!(outcome.metrics.makespan, 70);
    assert_eq!(outcome.metrics.context_switches, 15);
    assert_eq!(outcome.metrics.average_response_time, 24.4);
    assert_eq!(outcome.metrics.average_waiting_time, 37.7);
    assert_eq!(completion(&outcome, 1), 45);
    assert_eq!(completion(&outcome, 3), 70);

    let preempts = outcome
        .events
        .iter()
        .filter(|e| e.kind == EventKind::Preempt)
        .count();
    assert_eq!(preempts, 6);
}

#[test]
fn test_round_robin_slices_are_quantum_bounded() {
    let config = SimConfig::default();
    let outcome = demo(Policy::RoundRobin);

    for (process, _) in outcome.iter() {
        let slices: Vec<u64> = outcome
            .timeline
            .iter()
            .filter(|s| s.pid == process.pid)
            .map(|s| s.duration())
            .collect();
        let expected = (process.burst_time + config.time_quantum - 1) / config.time_quantum;
        assert_eq!(slices.len() as u64, expected, "{}", process.name);
        assert!(slices.iter().all(|&d| d <= config.time_quantum));
        assert_eq!(slices.iter().sum::<u64>(), process.burst_time);
    }
}

#[test]
fn test_round_robin_arrival_during_slice_goes_first() {
    let workload = vec![
        ProcessDescriptor::new(1, "A", 0, 5, 10),
        ProcessDescriptor::new(2, "B", 2, 8, 10),
    ];
    let outcome = run(&workload, &SimConfig::default(), Policy::RoundRobin).unwrap();

    assert_eq!(dispatch_order(&outcome), vec![1, 2, 1, 2, 2]);
    assert_eq!(completion(&outcome, 1), 12);
    assert_eq!(completion(&outcome, 2), 17);
    assert_eq!(outcome.state_of(2).unwrap().response_time, Some(5));
}

#[test]
fn test_non_preemptive_policies_never_preempt() {
    for policy in [Policy::Fcfs, Policy::Sjf, Policy::Priority] {
        let outcome = demo(policy);
        assert_eq!(outcome.timeline.len(), outcome.processes.len());
        assert!(outcome.events.iter().all(|e| e.kind != EventKind::Preempt));
        for state in &outcome.states {
            assert_eq!(state.waiting_time, state.response_time);
        }
    }
}

#[test]
fn test_long_idle_gap_completes_immediately() {
    let far = 1_000_000_000_000;
    let workload = vec![
        ProcessDescriptor::new(1, "A", 0, 1, 10).with_priority(1),
        ProcessDescriptor::new(2, "B", far, 1, 10).with_priority(1),
    ];

    for policy in Policy::ALL {
        let outcome = run(&workload, &SimConfig::default(), policy).unwrap();
        let waits: Vec<_> = outcome
            .events
            .iter()
            .filter(|e| e.kind == EventKind::ArrivalWait)
            .map(|e| (e.timestamp, e.pid))
            .collect();

        assert_eq!(waits, vec![(3, Some(2))], "{}", policy);
        assert_eq!(completion(&outcome, 2), far + 3);
        assert_eq!(outcome.metrics.makespan, far + 3);
    }
}
