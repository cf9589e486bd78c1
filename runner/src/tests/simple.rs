use core::module_path;
use function_name::named;
use processor::Processor;
use scheduler::{Config, ConfigError, Pid, Process, ProcessTemplate, SchedulingDecision};
use std::num::NonZeroU32;

use super::{run, scheduler};

fn process(pid: u32, service_time: u32, ram: u32) -> Process {
    Process::new(Pid::new(pid), 0, NonZeroU32::new(service_time).unwrap(), ram)
}

#[test]
#[named]
pub fn single_process() {
    let mut scheduler = scheduler(120);
    scheduler.add_process(process(1, 120, 64));

    let logs = Processor::run(scheduler);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
#[named]
pub fn residue_carry_over() {
    let mut scheduler = scheduler(150);
    scheduler.add_process(process(1, 30, 64));
    scheduler.add_process(process(2, 80, 128));

    let logs = Processor::run(scheduler);

    let executed: u32 = logs
        .iter()
        .filter_map(|log| match log.tick.decision {
            SchedulingDecision::Run { timeslice, .. } => Some(timeslice),
            SchedulingDecision::Idle(_) => None,
        })
        .sum();
    assert_eq!(executed, 110);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
#[named]
pub fn delayed_arrival() {
    let mut scheduler = scheduler(200);
    scheduler.set_template(ProcessTemplate {
        service_time: NonZeroU32::new(80),
        pid: Some(Pid::new(9)),
        ram: Some(256),
        ..ProcessTemplate::default()
    })
    .unwrap();
    scheduler.add_moment(120);

    let logs = Processor::run(scheduler);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &logs,
    );
}

#[test]
pub fn zero_quantum() {
    let config = Config {
        time_quantum: 0,
        ..Config::default()
    };
    assert!(matches!(
        scheduler::round_robin(&config),
        Err(ConfigError::ZeroQuantum)
    ));
}
