use std::num::NonZeroU32;
use std::ops::RangeInclusive;

use crate::config::check_range;
use crate::{ConfigError, Pid, ProcessState, RandomSource};

/// A simulated task: its arrival, the service time it still owes and its
/// (purely informational) memory demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    start_time: u64,
    service_time: u32,
    remaining: u32,
    executed: u64,
    slices: u32,
    ram: u32,
    state: ProcessState,
}

impl Process {
    /// Creates a ready process that arrives at `start_time`.
    pub fn new(pid: Pid, start_time: u64, service_time: NonZeroU32, ram: u32) -> Self {
        Process {
            pid,
            start_time,
            service_time: service_time.get(),
            remaining: service_time.get(),
            executed: 0,
            slices: 0,
            ram,
            state: ProcessState::Ready,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// The clock value at which the process arrived.
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// The service time the process asked for when it was created.
    pub fn service_time(&self) -> u32 {
        self.service_time
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// CPU time received so far.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Number of slices received so far.
    pub fn slices(&self) -> u32 {
        self.slices
    }

    pub fn ram(&self) -> u32 {
        self.ram
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Charges `elapsed` units of CPU time to the process.
    ///
    /// # Panics
    ///
    /// Panics if `elapsed` is larger than the remaining service time.
    pub(crate) fn run_for(&mut self, elapsed: u32) {
        assert!(
            elapsed <= self.remaining,
            "process {} was given {} units but only owes {}",
            self.pid,
            elapsed,
            self.remaining
        );
        self.remaining -= elapsed;
        self.executed += u64::from(elapsed);
        self.slices += 1;
    }
}

const MIN_SERVICE_TIME: NonZeroU32 = match NonZeroU32::new(10_000) {
    Some(time) => time,
    None => unreachable!(),
};
const MAX_SERVICE_TIME: NonZeroU32 = match NonZeroU32::new(u16::MAX as u32) {
    Some(time) => time,
    None => unreachable!(),
};

/// Recipe for minting random processes.
///
/// Every field left as `None` is drawn from the random source when a
/// process is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTemplate {
    pub service_time: Option<NonZeroU32>,
    pub pid: Option<Pid>,
    pub ram: Option<u32>,
    pub service_range: RangeInclusive<NonZeroU32>,
    pub ram_range: RangeInclusive<u32>,
}

impl Default for ProcessTemplate {
    fn default() -> Self {
        ProcessTemplate {
            service_time: None,
            pid: None,
            ram: None,
            service_range: MIN_SERVICE_TIME..=MAX_SERVICE_TIME,
            ram_range: 1..=1_000_000,
        }
    }
}

impl ProcessTemplate {
    /// Checks that both ranges can be drawn from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("service_range", &self.service_range)?;
        check_range("ram_range", &self.ram_range)
    }

    /// Generates a process arriving at `start_time`.
    ///
    /// # Panics
    ///
    /// Panics if a range that has to be drawn from is empty, see [`Self::validate`].
    pub fn generate<R: RandomSource>(&self, start_time: u64, random: &mut R) -> Process {
        let service_time = self.service_time.unwrap_or_else(|| {
            let min = *self.service_range.start();
            let drawn = random.uniform_u32(min.get(), self.service_range.end().get());
            min.saturating_add(drawn.saturating_sub(min.get()))
        });
        let pid = self
            .pid
            .unwrap_or_else(|| Pid::new(random.uniform_u32(0, u32::MAX)));
        let ram = self
            .ram
            .unwrap_or_else(|| random.uniform_u32(*self.ram_range.start(), *self.ram_range.end()));

        Process::new(pid, start_time, service_time, ram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entropy;
    use pretty_assertions::assert_eq;

    #[test]
    fn run_for_accounts_time() {
        let mut process = Process::new(Pid::new(3), 0, NonZeroU32::new(120).unwrap(), 64);
        process.run_for(50);
        process.run_for(70);
        assert!(process.is_finished());
        assert_eq!(process.executed(), 120);
        assert_eq!(process.slices(), 2);
    }

    #[test]
    #[should_panic]
    fn run_for_rejects_overdraw() {
        let mut process = Process::new(Pid::new(3), 0, NonZeroU32::new(10).unwrap(), 64);
        process.run_for(11);
    }

    #[test]
    fn generated_values_stay_in_range() {
        let template = ProcessTemplate::default();
        let mut random = Entropy::seeded(1);
        for start in 0..200 {
            let process = template.generate(start, &mut random);
            assert_eq!(process.start_time(), start);
            assert_eq!(process.state(), ProcessState::Ready);
            assert!((10_000..=65_535).contains(&process.service_time()));
            assert!((1..=1_000_000).contains(&process.ram()));
        }
    }

    #[test]
    fn empty_ranges_are_rejected() {
        let template = ProcessTemplate {
            ram_range: 10..=1,
            ..ProcessTemplate::default()
        };
        assert_eq!(
            template.validate(),
            Err(ConfigError::EmptyRange {
                name: "ram_range",
                min: 10,
                max: 1
            })
        );

        let template = ProcessTemplate {
            service_range: NonZeroU32::new(20).unwrap()..=NonZeroU32::new(5).unwrap(),
            ..ProcessTemplate::default()
        };
        assert_eq!(
            template.validate(),
            Err(ConfigError::EmptyRange {
                name: "service_range",
                min: 20,
                max: 5
            })
        );
        assert_eq!(ProcessTemplate::default().validate(), Ok(()));
    }

    #[test]
    fn single_value_service_range_is_drawn_exactly() {
        let one = NonZeroU32::new(1).unwrap();
        let template = ProcessTemplate {
            service_range: one..=one,
            ..ProcessTemplate::default()
        };
        let process = template.generate(0, &mut Entropy::seeded(2));
        assert_eq!(process.service_time(), 1);
    }

    #[test]
    fn pinned_values_are_kept() {
        let template = ProcessTemplate {
            service_time: NonZeroU32::new(77),
            pid: Some(Pid::new(0)),
            ram: Some(5),
            ..ProcessTemplate::default()
        };
        let process = template.generate(9, &mut Entropy::seeded(1));
        assert_eq!(
            process,
            Process::new(Pid::new(0), 9, NonZeroU32::new(77).unwrap(), 5)
        );
    }
}
