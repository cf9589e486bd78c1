//! A processor simulation library
//!
//! This is used for driving a scheduler from the [`scheduler`] crate
//! up to its horizon and recording what happened at each tick.

use std::fmt::{self, Display};

use scheduler::{Pid, Process, ProcessState, RunOutcome, Scheduler, SchedulingDecision, Tick};

/// Running iteration log
#[derive(Debug, PartialEq)]
pub struct Log {
    /// What the scheduler did during the tick.
    pub tick: Tick,

    /// The quantum residue left after the tick.
    pub residue: u32,

    /// The ready queue after the tick, front first.
    pub processes: Vec<ProcessInfo>,
}

impl Log {
    fn new<S: Scheduler>(tick: Tick, scheduler: &S) -> Log {
        Log {
            tick,
            residue: scheduler.residue(),
            processes: scheduler.list().into_iter().map(ProcessInfo::from).collect(),
        }
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "[{} -> {}] {}",
            self.tick.started, self.tick.clock, self.tick.decision
        )?;
        for pid in &self.tick.created {
            writeln!(f, "Created {}", pid)?;
        }
        writeln!(f, "PID\tSTATE\tSTART\tLEFT\tEXEC\tSLICES\tRAM")?;
        for process in &self.processes {
            writeln!(f, "{}", process)?;
        }
        writeln!(f, "residue {}", self.residue)
    }
}

/// Information about a process state.
#[derive(Debug, PartialEq)]
pub struct ProcessInfo {
    /// The PID of the process.
    pub pid: Pid,

    /// The process state.
    pub state: ProcessState,

    /// When the process arrived.
    pub start_time: u64,

    /// Service time still owed.
    pub remaining: u32,

    /// CPU time received so far.
    pub executed: u64,

    /// Number of slices received so far.
    pub slices: u32,

    /// Memory demand.
    pub ram: u32,
}

impl From<&Process> for ProcessInfo {
    fn from(process: &Process) -> Self {
        ProcessInfo {
            pid: process.pid(),
            state: process.state(),
            start_time: process.start_time(),
            remaining: process.remaining(),
            executed: process.executed(),
            slices: process.slices(),
            ram: process.ram(),
        }
    }
}

impl Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.pid,
            self.state,
            self.start_time,
            self.remaining,
            self.executed,
            self.slices,
            self.ram
        )
    }
}

/// Totals of a finished simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of ticks performed.
    pub ticks: u64,

    /// Processes that arrived.
    pub created: u64,

    /// Processes that finished.
    pub destroyed: u64,

    /// Processes still queued when the horizon was reached.
    pub abandoned: u64,

    /// Time units the CPU spent running processes.
    pub busy_time: u64,

    /// Time units the CPU spent idle.
    pub idle_time: u64,

    /// The clock when the simulation stopped.
    pub clock: u64,
}

impl Summary {
    fn record(&mut self, tick: &Tick) {
        self.ticks += 1;
        self.created += tick.created.len() as u64;
        self.clock = tick.clock;
        match tick.decision {
            SchedulingDecision::Run {
                timeslice, outcome, ..
            } => {
                self.busy_time += u64::from(timeslice);
                if outcome == RunOutcome::Destroyed {
                    self.destroyed += 1;
                }
            }
            SchedulingDecision::Idle(units) => self.idle_time += u64::from(units),
        }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Clock\t\t{}", self.clock)?;
        writeln!(f, "Ticks\t\t{}", self.ticks)?;
        writeln!(f, "Created\t\t{}", self.created)?;
        writeln!(f, "Destroyed\t{}", self.destroyed)?;
        writeln!(f, "Abandoned\t{}", self.abandoned)?;
        writeln!(f, "Busy\t\t{}", self.busy_time)?;
        write!(f, "Idle\t\t{}", self.idle_time)
    }
}

/// The processor simulator.
pub struct Processor<S: Scheduler> {
    scheduler: S,
    logs: Option<Vec<Log>>,
    summary: Summary,
}

impl<S: Scheduler> Processor<S> {
    /// Runs `scheduler` to its horizon and returns a log entry for every tick.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::Config;
    ///
    /// let config = Config {
    ///     time_total: 1_000,
    ///     seed: Some(1),
    ///     ..Config::default()
    /// };
    /// let logs = Processor::run(scheduler::round_robin(&config).unwrap());
    /// assert_eq!(logs.len(), 20);
    /// ```
    pub fn run(scheduler: S) -> Vec<Log> {
        let mut processor = Processor::new(scheduler, true);
        processor.drive();
        processor.logs.unwrap_or_default()
    }

    /// Runs `scheduler` to its horizon, keeping only the totals.
    pub fn simulate(scheduler: S) -> Summary {
        let mut processor = Processor::new(scheduler, false);
        processor.drive();
        processor.summary
    }

    fn new(scheduler: S, record: bool) -> Self {
        Processor {
            scheduler,
            logs: record.then(Vec::new),
            summary: Summary::default(),
        }
    }

    fn drive(&mut self) {
        while !self.scheduler.finished() {
            let tick = self.scheduler.next();
            self.summary.record(&tick);

            #[cfg(feature = "output")]
            println!("{}", tick.decision);

            if let Some(logs) = self.logs.as_mut() {
                logs.push(Log::new(tick, &self.scheduler));
            }
        }

        self.summary.clock = self.scheduler.clock();
        self.summary.abandoned = self.scheduler.list().len() as u64;
        log::info!(
            "simulation stopped at {} after {} ticks, {} processes left",
            self.summary.clock,
            self.summary.ticks,
            self.summary.abandoned
        );
    }
}

/// Format the [`Processor`]'s logs to a [`String`].
///
/// * `logs` - the logs returned by the [`Processor`].
///
/// ## Example
///
/// ```rust
/// use processor::{format_logs, Processor};
/// use scheduler::Config;
///
/// let config = Config {
///     time_total: 100,
///     arrival_interval: None,
///     ..Config::default()
/// };
/// let logs = Processor::run(scheduler::round_robin(&config).unwrap());
///
/// println!("{}", format_logs(&logs));
/// ```
pub fn format_logs(logs: &[Log]) -> String {
    let mut s = String::new();
    for (iteration, log) in logs.iter().enumerate() {
        fmt::write(
            &mut s,
            format_args!("===== Tick: {} =====\n{}\n", iteration + 1, log),
        )
        .unwrap();
    }
    s
}
