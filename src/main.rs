/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{info, warn};
use std::path::PathBuf;
use std::thread::Builder;

/* Custom libraries */
use elevator_sim::config;
use elevator_sim::dispatch::DispatchMode;
use elevator_sim::shared::ElevatorState;
use elevator_sim::simulation;
use elevator_sim::unwrap_or_exit;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Single-car elevator simulator")]
struct Args {
    /// Path to the TOML configuration
    #[clap(short, long, value_parser, default_value = "config.toml")]
    config: PathBuf,

    /// Override the dispatch policy (single_slot or scan)
    #[clap(short, long, value_parser)]
    dispatch: Option<DispatchMode>,

    /// Print every published elevator state as a JSON line
    #[clap(long, action)]
    trace_json: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = unwrap_or_exit!(config::load_config(&args.config), "Failed to load configuration");
    if let Some(dispatch) = args.dispatch {
        config.elevator.dispatch = dispatch;
    }

    // Optional trace printer
    let (state_tx, trace_thread) = if args.trace_json {
        let (state_tx, state_rx) = cbc::unbounded::<ElevatorState>();
        let thread = unwrap_or_exit!(
            Builder::new().name("trace".into()).spawn(move || {
                for state in state_rx.iter() {
                    match serde_json::to_string(&state) {
                        Ok(line) => println!("{}", line),
                        Err(e) => warn!("Failed to serialize state: {}", e),
                    }
                }
            }),
            "Failed to spawn trace thread"
        );
        (Some(state_tx), Some(thread))
    } else {
        (None, None)
    };

    let report = unwrap_or_exit!(simulation::run(&config, state_tx), "Simulation failed");

    if let Some(thread) = trace_thread {
        let _ = thread.join();
    }

    for (name, ride) in &report.rides {
        match ride {
            Ok(ride) => info!(
                "{}: boarded at tick {}, arrived at tick {}",
                name, ride.boarded_at_tick, ride.arrived_at_tick
            ),
            Err(e) => warn!("{}: {}", name, e),
        }
    }
    info!(
        "Elevator shut down ({:?}), {}/{} rides completed",
        report.shutdown,
        report.completed(),
        report.rides.len()
    );
}
