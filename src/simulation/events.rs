/*!
 * Simulation Events
 * Append-only event log and execution timeline produced by the engine
 */

use crate::core::types::{InlineString, Pid, Ticks};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// CPU idle until the next arrival
    ArrivalWait,
    /// Process needs more memory than is currently available
    Shortfall,
    SwapOut,
    SwapIn,
    Dispatch,
    Preempt,
    Complete,
    /// Memory demand unsatisfied after every eviction; admitted anyway
    Warning,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            EventKind::ArrivalWait => "ARRIVAL-WAIT",
            EventKind::Shortfall => "SHORTFALL",
            EventKind::SwapOut => "SWAP-OUT",
            EventKind::SwapIn => "SWAP-IN",
            EventKind::Dispatch => "DISPATCH",
            EventKind::Preempt => "PREEMPT",
            EventKind::Complete => "COMPLETE",
            EventKind::Warning => "WARNING",
        };
        f.write_str(label)
    }
}

/// One entry of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub timestamp: Ticks,
    pub kind: EventKind,
    /// Subject process; absent for CPU-wide events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<Pid>,
    pub detail: InlineString,
}

impl EventLogEntry {
    pub fn new(
        timestamp: Ticks,
        kind: EventKind,
        pid: Option<Pid>,
        detail: impl AsRef<str>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            pid,
            detail: detail.as_ref().into(),
        }
    }
}

/// A contiguous stretch of CPU time given to one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSegment {
    pub pid: Pid,
    pub start: Ticks,
    pub end: Ticks,
}

impl ExecutionSegment {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Append-only event log
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<EventLogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: EventLogEntry) {
        debug_assert!(
            self.entries
                .last()
                .map_or(true, |last| last.timestamp <= entry.timestamp),
            "event log timestamps must not go backwards"
        );
        self.entries.push(entry);
    }

    pub fn record(
        &mut self,
        timestamp: Ticks,
        kind: EventKind,
        pid: Option<Pid>,
        detail: impl AsRef<str>,
    ) {
        self.push(EventLogEntry::new(timestamp, kind, pid, detail));
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = EventLogEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<EventLogEntry> {
        self.entries
    }
}
