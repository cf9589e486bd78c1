use std::fmt::{self, Display};

use crate::Process;

/// The identifier of a simulated process.
///
/// Unlike real PIDs these are drawn at random, so `0` is a valid value
/// and collisions are possible.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(u32);

impl Pid {
    pub fn new(pid: u32) -> Pid {
        Pid(pid)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened to the process that held the CPU during a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process still owes service time and went to the back of the queue.
    Requeued,

    /// The process finished and was removed.
    Destroyed,
}

/// The action that the scheduler took during one tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// Ran the process with PID `pid` for `timeslice` time units.
    Run {
        pid: Pid,
        timeslice: u32,
        outcome: RunOutcome,
    },

    /// The ready queue was empty and the CPU idled for the given time units.
    Idle(u32),
}

impl SchedulingDecision {
    /// The number of time units the clock advanced by.
    pub fn elapsed(&self) -> u32 {
        match *self {
            SchedulingDecision::Run { timeslice, .. } => timeslice,
            SchedulingDecision::Idle(units) => units,
        }
    }
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run {
                pid,
                timeslice,
                outcome,
            } => {
                let outcome = match outcome {
                    RunOutcome::Requeued => "requeued",
                    RunOutcome::Destroyed => "destroyed",
                };
                write!(f, "Run {} for {} units, {}", pid, timeslice, outcome)
            }
            SchedulingDecision::Idle(units) => {
                write!(f, "Idle for {} units", units)
            }
        }
    }
}

/// The record of one simulation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// The clock value when the step started.
    pub started: u64,

    /// The clock value after the step.
    pub clock: u64,

    /// Processes that arrived at this step's quantum boundary, in queue order.
    pub created: Vec<Pid>,

    /// What the CPU did.
    pub decision: SchedulingDecision,
}

/// The trait that any scheduler has to implement.
pub trait Scheduler {
    /// Performs one simulation step and reports what happened.
    fn next(&mut self) -> Tick;

    /// Returns the current logical clock.
    fn clock(&self) -> u64;

    /// Returns the simulation horizon.
    fn horizon(&self) -> u64;

    /// Returns the configured time quantum.
    fn quantum(&self) -> u32;

    /// Returns the quantum residue carried to the next process.
    fn residue(&self) -> u32;

    /// Returns the ready processes, front of the queue first.
    fn list(&self) -> Vec<&Process>;

    /// Whether the clock has reached the horizon.
    fn finished(&self) -> bool {
        self.clock() >= self.horizon()
    }

    /// Runs steps until the horizon is reached.
    ///
    /// Processes still queued at that point are abandoned.
    fn simulate(&mut self) {
        while !self.finished() {
            self.next();
        }
    }
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The process is ready to be scheduled.
    Ready,

    /// The process is currently holding the CPU.
    Running,

    /// The process waits on a resource.
    ///
    /// Nothing in the engine moves a process here; the variant is reserved
    /// for a blocking model (I/O, memory contention) that does not exist yet.
    Blocked,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// Lifecycle callbacks invoked by the scheduler.
///
/// Every method defaults to doing nothing, implementors override the
/// moments they care about.
pub trait ProcessHooks {
    /// Called once, when the process is inserted in the ready queue.
    fn on_create(&mut self, _process: &Process) {}

    /// Called before the process receives a slice of CPU time.
    fn on_run_before(&mut self, _process: &Process) {}

    /// Called after the slice, before the process's remaining time is reduced.
    fn on_run_after(&mut self, _process: &Process) {}

    /// Called once, when the process has no remaining time, before removal.
    fn on_destroy(&mut self, _process: &Process) {}
}

/// Hooks that print creation and destruction on standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHooks;

impl ProcessHooks for ConsoleHooks {
    fn on_create(&mut self, process: &Process) {
        println!("Process of id {} has been created!", process.pid());
    }

    fn on_destroy(&mut self, process: &Process) {
        println!("Process of id {} has been destroyed!", process.pid());
    }
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentHooks;

impl ProcessHooks for SilentHooks {}
