//! A round robin scheduling library.
//!
//! This library models a single CPU shared by a randomly arriving
//! population of processes. It provides the process model, the
//! arrival schedule, the ready queue and the round robin engine
//! that ties them together.
//!

mod arrivals;
mod config;
mod process;
mod random;
mod ready_queue;
mod scheduler;

pub use crate::arrivals::ArrivalSchedule;
pub use crate::config::{Config, ConfigError};
pub use crate::process::{Process, ProcessTemplate};
pub use crate::random::{Entropy, RandomSource};
pub use crate::ready_queue::ReadyQueue;
pub use crate::scheduler::{
    ConsoleHooks, Pid, ProcessHooks, ProcessState, RunOutcome, Scheduler, SchedulingDecision,
    SilentHooks, Tick,
};

mod schedulers;

pub use schedulers::RoundRobin;

/// Returns a round robin scheduler for `config`.
///
/// The random source is seeded with `config.seed` when present and from
/// the operating system otherwise. Process creation and destruction are
/// announced on standard output.
///
/// Fails when the configuration is invalid, for example a time quantum of 0.
pub fn round_robin(config: &Config) -> Result<RoundRobin<Entropy>, ConfigError> {
    RoundRobin::new(config, entropy(config))
}

/// Like [`round_robin`], with caller supplied lifecycle hooks.
pub fn round_robin_with_hooks(
    config: &Config,
    hooks: Box<dyn ProcessHooks>,
) -> Result<RoundRobin<Entropy>, ConfigError> {
    RoundRobin::with_hooks(config, entropy(config), hooks)
}

fn entropy(config: &Config) -> Entropy {
    match config.seed {
        Some(seed) => Entropy::seeded(seed),
        None => Entropy::from_entropy(),
    }
}
