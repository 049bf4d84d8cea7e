/*!
 * Simulation Engine
 * The time-stepped dispatch loop shared by every policy
 */

use super::clock::SimulationClock;
use super::events::{EventKind, EventLog, ExecutionSegment};
use super::SimulationOutcome;
use crate::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::Slot;
use crate::memory::MemoryArbiter;
use crate::monitoring::Metrics;
use crate::process::{ProcessDescriptor, ProcessRegistry};
use crate::scheduler::{Dispatcher, Policy};
use tracing::{debug, info};

/// One simulation run. Owns every piece of mutable state exclusively.
pub(crate) struct Engine {
    config: SimConfig,
    policy: Policy,
    dispatcher: Box<dyn Dispatcher>,
    registry: ProcessRegistry,
    arbiter: MemoryArbiter,
    clock: SimulationClock,
    log: EventLog,
    timeline: Vec<ExecutionSegment>,
    idle: bool,
}

impl Engine {
    pub fn new(processes: Vec<ProcessDescriptor>, config: &SimConfig, policy: Policy) -> Self {
        Self::with_dispatcher(processes, config, policy.dispatcher(config))
    }

    pub fn with_dispatcher(
        mut processes: Vec<ProcessDescriptor>,
        config: &SimConfig,
        dispatcher: Box<dyn Dispatcher>,
    ) -> Self {
        dispatcher.arrange(&mut processes);

        Self {
            config: *config,
            policy: dispatcher.policy(),
            dispatcher,
            registry: ProcessRegistry::new(processes),
            arbiter: MemoryArbiter::new(config),
            clock: SimulationClock::new(),
            log: EventLog::new(),
            timeline: Vec::new(),
            idle: false,
        }
    }

    pub fn run(mut self) -> SimResult<SimulationOutcome> {
        info!(
            processes = self.registry.len(),
            total_memory = self.config.total_memory,
            swap_time = self.config.swap_time,
            "Simulation started"
        );

        while !self.registry.all_completed() {
            self.step()?;
        }

        let memory = self.arbiter.stats(&self.registry);
        let (processes, states) = self.registry.into_parts();
        let metrics = Metrics::aggregate(&processes, &states, self.config.swap_time)?;

        info!(
            makespan = metrics.makespan,
            avg_waiting = metrics.average_waiting_time,
            swapped_out = metrics.swapped_out_count,
            "Simulation finished"
        );

        Ok(SimulationOutcome {
            policy: self.policy,
            config: self.config,
            processes,
            states,
            events: self.log.into_vec(),
            timeline: self.timeline,
            metrics,
            memory,
        })
    }

    fn step(&mut self) -> SimResult<()> {
        let now = self.clock.now();
        self.registry.refresh_arrivals(now);

        match self.dispatcher.select_next(&self.registry, now) {
            Some(slot) => {
                self.idle = false;
                self.dispatch(slot)
            }
            None => {
                self.wait_for_arrival();
                Ok(())
            }
        }
    }

    // Nothing changes before the next arrival, so the clock jumps straight to it
    fn wait_for_arrival(&mut self) {
        let now = self.clock.now();
        let next = self
            .registry
            .next_arrival(now)
            .map(|slot| self.registry.descriptor(slot));

        if !self.idle {
            self.idle = true;
            let detail = match next {
                Some(p) => format!("CPU idle until {} arrives at {}", p.name, p.arrival_time),
                None => "CPU idle".to_string(),
            };
            self.log.record(now, EventKind::ArrivalWait, next.map(|p| p.pid), detail);
        }

        match next.map(|p| p.arrival_time) {
            Some(arrival) => {
                self.clock.advance(arrival - now);
            }
            None => {
                self.clock.tick();
            }
        }
    }

    fn dispatch(&mut self, slot: Slot) -> SimResult<()> {
        // Residency is established once and held until eviction after completion
        if !self.registry.state(slot).resident {
            let admission = self
                .arbiter
                .ensure_capacity(slot, self.clock.now(), &mut self.registry)?;
            self.clock.advance(admission.elapsed);
            self.log.extend(admission.events);
        }

        let start = self.clock.now();
        self.registry.begin_dispatch(slot, start)?;

        let slice = self.dispatcher.slice(&self.registry, slot);
        let pid = self.registry.descriptor(slot).pid;
        let name = self.registry.descriptor(slot).name.clone();
        let remaining = self.registry.state(slot).remaining_time;

        debug!(pid, start, slice, remaining, "Dispatching");
        self.log.record(
            start,
            EventKind::Dispatch,
            Some(pid),
            format!(
                "Executing process {} (remaining: {}, slice: {})",
                name, remaining, slice
            ),
        );

        self.registry.execute(slot, slice)?;
        let end = self.clock.advance(slice);
        self.timeline.push(ExecutionSegment { pid, start, end });

        let completed = self.registry.state(slot).remaining_time == 0;
        if completed {
            self.registry.complete(slot, end)?;
        } else {
            self.registry.preempt(slot)?;
        }
        let requeued = self.dispatcher.after_slice(&self.registry, slot, end);

        if completed {
            self.log
                .record(end, EventKind::Complete, Some(pid), format!("Process {} completed", name));
        } else {
            // Queue-driven policies lose a preempted process they do not hand back
            if !requeued && self.policy.is_preemptive() {
                return Err(SimError::invariant(format!(
                    "process {} preempted but not requeued",
                    pid
                )));
            }
            self.log.record(
                end,
                EventKind::Preempt,
                Some(pid),
                format!(
                    "Process {} preempted (remaining: {})",
                    name,
                    self.registry.state(slot).remaining_time
                ),
            );
        }

        self.arbiter.check_conservation(&self.registry)
    }
}
