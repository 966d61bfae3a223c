use log::{info, warn};
use std::fmt;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::config::PassengerConfig;
use crate::dispatch::direction_toward;
use crate::elevator::ElevatorHandle;
use crate::shared::{ElevatorState, Floor, RequestError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Boarding,
    Exiting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Boarding => write!(f, "boarding"),
            Stage::Exiting => write!(f, "exiting"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PassengerError {
    #[error("{passenger} gave up {stage} after {polls} polls and took the stairs")]
    ClientTimeout {
        passenger: String,
        stage: Stage,
        polls: u32,
    },

    #[error("{passenger} is already at floor {floor}")]
    SameFloor { passenger: String, floor: Floor },

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Completed trip, with the controller tick at which each step was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    pub boarded_at_tick: u64,
    pub arrived_at_tick: u64,
}

/// Rider that calls the car, boards, picks a destination and waits to get out.
///
/// Every wait is bounded: at most `max_polls` waits of `poll_interval` each. Running out
/// only affects this passenger; the controller never learns about it. A car that has
/// already shut down is waited out the same way and ends in `ClientTimeout`.
#[derive(Debug, Clone)]
pub struct Passenger {
    pub name: String,
    pub origin: Floor,
    pub destination: Floor,
    pub start_delay: Duration,
    poll_interval: Duration,
    max_polls: u32,
}

impl Passenger {
    pub fn new(config: &PassengerConfig, poll_interval: Duration, max_polls: u32) -> Passenger {
        Passenger {
            name: config.name.clone(),
            origin: config.origin,
            destination: config.destination,
            start_delay: Duration::from_millis(config.start_delay_ms),
            poll_interval,
            max_polls,
        }
    }

    pub fn ride(&self, elevator: &ElevatorHandle) -> Result<Ride, PassengerError> {
        let direction = direction_toward(self.origin, self.destination).ok_or_else(|| {
            PassengerError::SameFloor {
                passenger: self.name.clone(),
                floor: self.origin,
            }
        })?;

        info!(
            "{} calls the elevator at floor {} going {}",
            self.name, self.origin, direction
        );
        elevator.request_elevator(self.origin, direction)?;
        let boarded = self.wait_for(elevator, Stage::Boarding, self.origin)?;

        info!("{} boards at floor {} and selects {}", self.name, self.origin, self.destination);
        elevator.select_floor(self.destination)?;
        let arrived = self.wait_for(elevator, Stage::Exiting, self.destination)?;

        info!("{} gets out at floor {}", self.name, self.destination);
        Ok(Ride {
            boarded_at_tick: boarded.tick,
            arrived_at_tick: arrived.tick,
        })
    }

    fn wait_for(
        &self,
        elevator: &ElevatorHandle,
        stage: Stage,
        floor: Floor,
    ) -> Result<ElevatorState, PassengerError> {
        for _ in 0..self.max_polls {
            let polled_at = Instant::now();
            if let Some(state) = elevator
                .status
                .wait_until(self.poll_interval, |s| s.is_open_at(floor))
            {
                return Ok(state);
            }
            // A stopped car answers at once; every poll still costs a full interval
            if let Some(rest) = self.poll_interval.checked_sub(polled_at.elapsed()) {
                sleep(rest);
            }
        }

        warn!("{} waited too long while {} at floor {}", self.name, stage, floor);
        Err(PassengerError::ClientTimeout {
            passenger: self.name.clone(),
            stage,
            polls: self.max_polls,
        })
    }
}
