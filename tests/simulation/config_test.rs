/*!
 * Configuration Tests
 * Workload validation and JSON workload loading
 */

use pretty_assertions::assert_eq;
use sched_sim::process::workload::from_json_str;
use sched_sim::{compare, run, ConfigError, Policy, ProcessDescriptor, SimConfig, SimError};

fn config_error(workload: &[ProcessDescriptor], policy: Policy) -> ConfigError {
    match run(workload, &SimConfig::default(), policy) {
        Err(SimError::Config(err)) => err,
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_invalid_workloads_are_rejected() {
    assert_eq!(config_error(&[], Policy::Fcfs), ConfigError::EmptyWorkload);

    let duplicate = vec![
        ProcessDescriptor::new(7, "a", 0, 1, 10),
        ProcessDescriptor::new(7, "b", 0, 1, 10),
    ];
    assert_eq!(config_error(&duplicate, Policy::Sjf), ConfigError::DuplicatePid(7));

    let idle = vec![ProcessDescriptor::new(1, "a", 0, 0, 10)];
    assert_eq!(config_error(&idle, Policy::Fcfs), ConfigError::NonPositiveBurst(1));

    let weightless = vec![ProcessDescriptor::new(1, "a", 0, 1, 0)];
    assert_eq!(
        config_error(&weightless, Policy::RoundRobin),
        ConfigError::NonPositiveMemory(1)
    );
}

#[test]
fn test_priority_rank_required_only_for_priority_policy() {
    let unranked = vec![ProcessDescriptor::new(3, "a", 0, 2, 10)];
    assert_eq!(
        config_error(&unranked, Policy::Priority),
        ConfigError::MissingPriority(3)
    );
    assert!(run(&unranked, &SimConfig::default(), Policy::Sjf).is_ok());
}

#[test]
fn test_compare_stops_at_first_failure() {
    let unranked = vec![ProcessDescriptor::new(3, "a", 0, 2, 10)];
    let result = compare(&unranked, &SimConfig::default(), &Policy::ALL);
    assert_eq!(
        result.unwrap_err(),
        SimError::Config(ConfigError::MissingPriority(3))
    );
}

#[test]
fn test_json_workload() {
    let json = r#"[
        {"pid": 1, "name": "web", "arrival_time": 0, "burst_time": 2, "memory_required": 256},
        {"pid": 2, "name": "batch", "category": "Batch", "arrival_time": 1,
         "burst_time": 6, "memory_required": 4000, "priority": 3}
    ]"#;
    let workload = from_json_str(json).unwrap();

    assert_eq!(workload.len(), 2);
    assert_eq!(workload[0].priority, None);
    assert_eq!(workload[1].category.as_str(), "Batch");

    let outcome = run(&workload, &SimConfig::default(), Policy::Fcfs).unwrap();
    assert_eq!(outcome.metrics.process_count, 2);
}

#[test]
fn test_malformed_json_workload() {
    let err = from_json_str(r#"[{"pid": 1}]"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWorkload(_)));
}

#[test]
fn test_errors_serialize_tagged() {
    let err = SimError::Config(ConfigError::DuplicatePid(4));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["error_type"], "config");
    assert_eq!(json["details"]["error_type"], "duplicate_pid");
    assert_eq!(json["details"]["details"], 4);
}

#[test]
fn test_memory_beyond_signed_ledger_is_rejected() {
    let max = i64::MAX as u64;
    let config = SimConfig::default().with_total_memory(max + 1);
    assert_eq!(
        run(&[ProcessDescriptor::new(1, "a", 0, 1, 10)], &config, Policy::Fcfs).unwrap_err(),
        SimError::Config(ConfigError::TotalMemoryOutOfRange(max + 1))
    );

    let workload = vec![
        ProcessDescriptor::new(1, "a", 0, 1, max),
        ProcessDescriptor::new(2, "b", 0, 1, 1),
    ];
    assert_eq!(
        config_error(&workload, Policy::Fcfs),
        ConfigError::WorkloadMemoryOutOfRange(2)
    );
}
