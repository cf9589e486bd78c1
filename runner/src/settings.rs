use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;
use scheduler::Config;

/// Builds the simulation configuration from the environment.
///
/// Every variable is optional and falls back to [`Config::default`].
/// `ARRIVAL_INTERVAL` set to `0` or `off` disables random arrivals.
pub fn config() -> Result<Config> {
    let defaults = Config::default();

    let arrival_interval = match env::var("ARRIVAL_INTERVAL") {
        Ok(value) if value == "off" || value == "0" => None,
        Ok(value) => Some(parse("ARRIVAL_INTERVAL", &value)?),
        Err(_) => defaults.arrival_interval,
    };

    let config = Config {
        time_total: variable("TIME_TOTAL")?.unwrap_or(defaults.time_total),
        time_quantum: variable("TIME_QUANTUM")?.unwrap_or(defaults.time_quantum),
        arrival_interval,
        arrival_spread: variable("ARRIVAL_SPREAD")?.unwrap_or(defaults.arrival_spread),
        seed: variable("SEED")?,
        ..defaults
    };
    config.validate().context("invalid simulation configuration")?;
    Ok(config)
}

/// The log level from `LOG_LEVEL`, `info` when unset.
pub fn log_level() -> Result<LevelFilter> {
    Ok(variable("LOG_LEVEL")?.unwrap_or(LevelFilter::Info))
}

fn variable<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .ok()
        .map(|value| parse(name, &value))
        .transpose()
}

fn parse<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("{name} has an invalid value {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn parse_reports_the_variable() {
        assert_eq!(parse::<u32>("TIME_QUANTUM", " 25 ").unwrap(), 25);
        let error = parse::<u32>("TIME_QUANTUM", "fifty").unwrap_err();
        assert!(error.to_string().contains("TIME_QUANTUM"));
    }
}
