use std::mem;
use std::num::NonZeroU32;

use crate::ProcessState::{Ready, Running};
use crate::RunOutcome::{Destroyed, Requeued};
use crate::SchedulingDecision::{Idle, Run};
use crate::{
    ArrivalSchedule, Config, ConfigError, ConsoleHooks, Pid, Process, ProcessHooks,
    ProcessTemplate, RandomSource, ReadyQueue, Scheduler, SchedulingDecision, Tick,
};

/// Round robin over a single CPU with quantum residue carry-over.
///
/// When a process finishes before using its whole quantum, the unused part
/// (the residue) is handed to the next process in the queue instead of
/// starting a new quantum. The clock therefore always lands back on a
/// multiple of the quantum once the residue is used up, and arrivals are
/// only checked on those boundaries.
pub struct RoundRobin<R: RandomSource> {
    ready_queue: ReadyQueue,
    arrivals: ArrivalSchedule,
    random: R,
    hooks: Box<dyn ProcessHooks>,
    template: ProcessTemplate,
    time_total: u64,
    time_current: u64,
    time_quantum: NonZeroU32,
    residue: u32,
    arrival_interval: Option<u64>,
    arrival_spread: u64,
}

impl<R: RandomSource> RoundRobin<R> {
    /// Creates a scheduler that announces process creation and destruction
    /// on standard output.
    pub fn new(config: &Config, random: R) -> Result<Self, ConfigError> {
        RoundRobin::with_hooks(config, random, Box::new(ConsoleHooks))
    }

    pub fn with_hooks(
        config: &Config,
        random: R,
        hooks: Box<dyn ProcessHooks>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let time_quantum = NonZeroU32::new(config.time_quantum).ok_or(ConfigError::ZeroQuantum)?;
        let service_range = NonZeroU32::new(*config.service_time.start())
            .zip(NonZeroU32::new(*config.service_time.end()))
            .map(|(min, max)| min..=max)
            .ok_or(ConfigError::ZeroServiceTime)?;

        Ok(RoundRobin {
            ready_queue: ReadyQueue::new(),
            arrivals: ArrivalSchedule::new(),
            random,
            hooks,
            template: ProcessTemplate {
                service_range,
                ram_range: config.ram_demand.clone(),
                ..ProcessTemplate::default()
            },
            time_total: config.time_total,
            time_current: 0,
            time_quantum,
            residue: 0,
            arrival_interval: config.arrival_interval,
            arrival_spread: config.arrival_spread,
        })
    }

    /// Replaces the template used for processes minted from arrival moments.
    ///
    /// Pinning a field makes every generated process share that value.
    /// A template with an empty range is rejected and the current one kept.
    pub fn set_template(&mut self, template: ProcessTemplate) -> Result<(), ConfigError> {
        template.validate()?;
        self.template = template;
        Ok(())
    }

    /// Inserts a process at the back of the ready queue.
    pub fn add_process(&mut self, process: Process) {
        self.hooks.on_create(&process);
        self.ready_queue.enqueue(process);
    }

    /// Schedules an arrival at `timestamp`.
    pub fn add_moment(&mut self, timestamp: u64) {
        self.arrivals.add_moment(timestamp);
    }

    /// Mints a process from the template, without queueing it.
    pub fn generate_process(&mut self, start_time: u64) -> Process {
        self.template.generate(start_time, &mut self.random)
    }

    /// Arrival moments that have not materialized yet.
    pub fn pending_arrivals(&self) -> &ArrivalSchedule {
        &self.arrivals
    }

    fn mint_arrival(&mut self) {
        let last = self
            .time_current
            .saturating_add(self.arrival_spread.saturating_sub(1));
        let moment = self.random.uniform_u64(self.time_current, last);
        log::debug!("[{}] new arrival moment at {}", self.time_current, moment);
        self.arrivals.add_moment(moment);
    }

    /// Moves every arrival due within the next quantum into the ready queue.
    ///
    /// Moments that fell inside the last quantum after its boundary was
    /// checked (added by a caller mid-quantum) arrive late, now. Anything
    /// older than the previous boundary is dropped.
    fn check_next_quantum(&mut self) -> Vec<Pid> {
        let quantum = u64::from(self.time_quantum.get());
        let previous_boundary = self.time_current.saturating_sub(quantum);

        let stale = self.arrivals.discard_before(previous_boundary);
        if stale > 0 {
            log::warn!(
                "[{}] dropped {} arrival moments older than {}",
                self.time_current,
                stale,
                previous_boundary
            );
        }

        let window_end = self.time_current + quantum;
        let mut created = Vec::new();
        for moment in self.arrivals.pop_due(previous_boundary, window_end) {
            let process = self.generate_process(moment);
            log::debug!(
                "[{}] process {} arrives at {} owing {}",
                self.time_current,
                process.pid(),
                moment,
                process.remaining()
            );
            created.push(process.pid());
            self.add_process(process);
        }
        created
    }

    /// Gives the front process its slice and puts it back or retires it.
    fn run_front(&mut self) -> SchedulingDecision {
        let quantum = self.time_quantum.get();

        let Some(mut process) = self.ready_queue.dequeue_front() else {
            let elapsed = if self.residue > 0 {
                mem::take(&mut self.residue)
            } else {
                quantum
            };
            return Idle(elapsed);
        };

        process.set_state(Running);
        self.hooks.on_run_before(&process);

        let remaining = process.remaining();
        let timeslice = if self.residue > 0 {
            if self.residue > remaining {
                self.residue -= remaining;
                remaining
            } else {
                mem::take(&mut self.residue)
            }
        } else if quantum > remaining {
            self.residue = quantum - remaining;
            remaining
        } else {
            quantum
        };

        self.hooks.on_run_after(&process);
        process.run_for(timeslice);
        process.set_state(Ready);

        let pid = process.pid();
        log::trace!(
            "[{}] process {} ran for {}, {} left",
            self.time_current,
            pid,
            timeslice,
            process.remaining()
        );

        let outcome = if process.is_finished() {
            self.hooks.on_destroy(&process);
            Destroyed
        } else {
            self.ready_queue.enqueue(process);
            Requeued
        };

        Run {
            pid,
            timeslice,
            outcome,
        }
    }
}

impl<R: RandomSource> Scheduler for RoundRobin<R> {
    fn next(&mut self) -> Tick {
        let started = self.time_current;
        let mut created = Vec::new();

        if started % u64::from(self.time_quantum.get()) == 0 {
            if let Some(interval) = self.arrival_interval {
                if started % interval == 0 {
                    self.mint_arrival();
                }
            }
            created = self.check_next_quantum();
        }

        let decision = self.run_front();
        self.time_current += u64::from(decision.elapsed());
        debug_assert!(self.residue < self.time_quantum.get());

        Tick {
            started,
            clock: self.time_current,
            created,
            decision,
        }
    }

    fn clock(&self) -> u64 {
        self.time_current
    }

    fn horizon(&self) -> u64 {
        self.time_total
    }

    fn quantum(&self) -> u32 {
        self.time_quantum.get()
    }

    fn residue(&self) -> u32 {
        self.residue
    }

    fn list(&self) -> Vec<&Process> {
        self.ready_queue.iter().collect()
    }
}
