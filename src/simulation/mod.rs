//! Passenger simulation around one controller.

pub mod passenger;

#[cfg(test)]
mod simulation_tests;

pub use passenger::{Passenger, PassengerError, Ride, Stage};

use crossbeam_channel as cbc;
use log::info;
use std::thread::{sleep, Builder, JoinHandle};

use crate::config::Config;
use crate::elevator::{self, Shutdown};
use crate::shared::ElevatorState;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("failed to spawn thread '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("thread '{0}' panicked")]
    Panicked(String),
}

#[derive(Debug)]
pub struct SimulationReport {
    pub shutdown: Shutdown,
    pub rides: Vec<(String, Result<Ride, PassengerError>)>,
}

impl SimulationReport {
    pub fn completed(&self) -> usize {
        self.rides.iter().filter(|(_, ride)| ride.is_ok()).count()
    }
}

fn spawn_named<T, F>(name: &str, f: F) -> Result<JoinHandle<T>, SimulationError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    Builder::new()
        .name(name.to_string())
        .spawn(f)
        .map_err(|source| SimulationError::Spawn {
            name: name.to_string(),
            source,
        })
}

/// Runs the controller and every configured passenger on their own threads and waits
/// for all of them.
pub fn run(
    config: &Config,
    state_tx: Option<cbc::Sender<ElevatorState>>,
) -> Result<SimulationReport, SimulationError> {
    let (mut fsm, handle) = elevator::build(&config.elevator);
    if let Some(state_tx) = state_tx {
        fsm = fsm.with_state_channel(state_tx);
    }
    info!(
        "Starting simulation with {} passengers, dispatch {}",
        config.simulation.passengers.len(),
        config.elevator.dispatch
    );

    let fsm_thread = spawn_named("elevator_fsm", move || fsm.run())?;

    let mut passenger_threads = Vec::new();
    for passenger_config in &config.simulation.passengers {
        let passenger = Passenger::new(
            passenger_config,
            config.simulation.poll_interval(),
            config.simulation.max_polls,
        );
        let handle = handle.clone();
        let name = passenger.name.clone();
        let thread = spawn_named(&format!("passenger_{}", name), move || {
            sleep(passenger.start_delay);
            passenger.ride(&handle)
        })?;
        passenger_threads.push((name, thread));
    }

    let mut rides = Vec::new();
    for (name, thread) in passenger_threads {
        let ride = thread
            .join()
            .map_err(|_| SimulationError::Panicked(format!("passenger_{}", name)))?;
        rides.push((name, ride));
    }

    let shutdown = fsm_thread
        .join()
        .map_err(|_| SimulationError::Panicked("elevator_fsm".to_string()))?;

    Ok(SimulationReport { shutdown, rides })
}
