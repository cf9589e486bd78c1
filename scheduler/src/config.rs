use std::fmt::Display;
use std::ops::RangeInclusive;

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The clock value at which the simulation stops.
    pub time_total: u64,

    /// The maximum slice a process receives per turn. Must not be 0.
    pub time_quantum: u32,

    /// How often (in clock units) a new arrival moment is drawn.
    /// `None` disables random arrivals altogether.
    pub arrival_interval: Option<u64>,

    /// Width of the window `[now, now + arrival_spread)` a new arrival
    /// moment is drawn from.
    pub arrival_spread: u64,

    /// Service time of generated processes.
    pub service_time: RangeInclusive<u32>,

    /// Memory demand of generated processes.
    pub ram_demand: RangeInclusive<u32>,

    /// Fixed seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_total: 6_000_000,
            time_quantum: 50,
            arrival_interval: Some(18_000),
            arrival_spread: 1_000_000,
            service_time: 10_000..=u16::MAX as u32,
            ram_demand: 1..=1_000_000,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        if self.arrival_interval == Some(0) {
            return Err(ConfigError::ZeroArrivalInterval);
        }
        if self.arrival_spread == 0 {
            return Err(ConfigError::ZeroArrivalSpread);
        }
        check_range("service_time", &self.service_time)?;
        check_range("ram_demand", &self.ram_demand)?;
        if *self.service_time.start() == 0 {
            return Err(ConfigError::ZeroServiceTime);
        }
        Ok(())
    }
}

pub(crate) fn check_range<T>(name: &'static str, range: &RangeInclusive<T>) -> Result<(), ConfigError>
where
    T: Copy + PartialOrd + Into<u32>,
{
    if range.start() > range.end() {
        return Err(ConfigError::EmptyRange {
            name,
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        });
    }
    Ok(())
}

/// A configuration that cannot drive a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The boundary check divides by the quantum.
    ZeroQuantum,
    ZeroArrivalInterval,
    ZeroArrivalSpread,
    /// A range whose lower bound is above its upper bound.
    EmptyRange {
        name: &'static str,
        min: u32,
        max: u32,
    },
    /// Processes must owe at least one unit of time.
    ZeroServiceTime,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroQuantum => write!(f, "time quantum must be greater than 0"),
            ConfigError::ZeroArrivalInterval => {
                write!(f, "arrival interval must be greater than 0")
            }
            ConfigError::ZeroArrivalSpread => write!(f, "arrival spread must be greater than 0"),
            ConfigError::EmptyRange { name, min, max } => {
                write!(f, "{name} range is empty ({min} > {max})")
            }
            ConfigError::ZeroServiceTime => {
                write!(f, "service time range must not include 0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "horizon {}, quantum {}, ",
            self.time_total, self.time_quantum
        )?;
        match self.arrival_interval {
            Some(interval) => write!(
                f,
                "arrival every {} within {}",
                interval, self.arrival_spread
            )?,
            None => write!(f, "no random arrivals")?,
        }
        if let Some(seed) = self.seed {
            write!(f, ", seed {seed}")?;
        }
        Ok(())
    }
}
