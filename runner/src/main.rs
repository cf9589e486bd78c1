use anyhow::Result;

use processor::Processor;

mod logger;
mod settings;

fn main() -> Result<()> {
    logger::init(settings::log_level()?)?;

    let config = settings::config()?;
    log::info!("{}", config);

    let summary = Processor::simulate(scheduler::round_robin(&config)?);

    println!("{}", summary);
    Ok(())
}

#[cfg(test)]
mod tests;
