use scheduler::{round_robin_with_hooks, Config, Entropy, RoundRobin, SilentHooks};

use std::env;
use std::fs;

use processor::format_logs;
use processor::Log;

mod simple;

static SCHEDULER: &str = "round-robin";

fn outputs(folder: &str) -> String {
    format!(
        "{}/../outputs/{SCHEDULER}/{folder}",
        env!("CARGO_MANIFEST_DIR")
    )
}

fn write_logs(folder: &str, name: &str, logs: &str) {
    let folder = outputs(folder);
    fs::create_dir_all(&folder).unwrap();
    fs::write(format!("{folder}/{name}.log"), logs).unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    fs::read_to_string(format!("{}/{name}.log", outputs(folder))).unwrap()
}

fn run(folder: &str, name: &str, logs: &[Log]) {
    let output = format_logs(logs);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

/// A quiet scheduler: quantum 50, no random arrivals, no console output.
fn scheduler(time_total: u64) -> RoundRobin<Entropy> {
    let config = Config {
        time_total,
        time_quantum: 50,
        arrival_interval: None,
        seed: Some(0),
        ..Config::default()
    };
    round_robin_with_hooks(&config, Box::new(SilentHooks)).unwrap()
}
