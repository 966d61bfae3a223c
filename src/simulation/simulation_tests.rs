/*
 * Tests for the passenger simulation
 *
 * These run real threads with a fast tick, so waits are bounded with generous
 * poll budgets.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
use crossbeam_channel::unbounded;
use std::thread::{sleep, spawn};
use std::time::Duration;

use crate::config::{parse_config, Config, PassengerConfig};
use crate::elevator::{build, Shutdown};
use crate::shared::Direction::Down;
use crate::shared::{Behaviour, ElevatorState};
use crate::simulation::{run, Passenger, PassengerError, Stage};

fn fast_config(passengers: &str) -> Config {
    let config = format!(
        r#"
        [elevator]
        min_floor = 0
        max_floor = 10
        idle_shutdown_ticks = 100
        stopped_dwell_ticks = 3
        tick_interval_ms = 2

        [simulation]
        poll_interval_ms = 5
        max_polls = 400
        {}
        "#,
        passengers
    );
    parse_config(&config).unwrap()
}

#[test]
fn test_simulation_single_rider() {
    // Arrange
    let config = fast_config(
        r#"
        [[simulation.passengers]]
        name = "ada"
        origin = 5
        destination = 8
        "#,
    );
    let (state_tx, state_rx) = unbounded::<ElevatorState>();

    // Act
    let report = run(&config, Some(state_tx)).unwrap();

    // Assert
    assert_eq!(report.shutdown, Shutdown::IdleTimeout);
    assert_eq!(report.completed(), 1);
    let (name, ride) = &report.rides[0];
    assert_eq!(name, "ada");
    let ride = ride.as_ref().unwrap();
    assert!(ride.arrived_at_tick > ride.boarded_at_tick);

    let states: Vec<ElevatorState> = state_rx.try_iter().collect();
    assert!(states.iter().any(|s| s.is_open_at(5)));
    assert!(states.iter().any(|s| s.is_open_at(8)));
    assert_eq!(states.last().map(|s| s.behaviour), Some(Behaviour::Idle));
}

#[test]
fn test_simulation_riders_one_after_another() {
    let config = fast_config(
        r#"
        [[simulation.passengers]]
        name = "ada"
        origin = 2
        destination = 6

        [[simulation.passengers]]
        name = "brian"
        origin = 9
        destination = 1
        start_delay_ms = 60
        "#,
    );

    let report = run(&config, None).unwrap();

    assert_eq!(report.completed(), 2);
}

#[test]
fn test_passenger_times_out_when_car_never_comes() {
    // Arrange: controller built but never run, so nothing is ever served
    let config = fast_config("");
    let (_fsm, handle) = build(&config.elevator);
    let passenger = Passenger::new(
        &PassengerConfig {
            name: "chidi".to_string(),
            origin: 4,
            destination: 0,
            start_delay_ms: 0,
        },
        std::time::Duration::from_millis(1),
        5,
    );

    // Act
    let result = passenger.ride(&handle);

    // Assert
    assert_eq!(
        result,
        Err(PassengerError::ClientTimeout {
            passenger: "chidi".to_string(),
            stage: Stage::Boarding,
            polls: 5,
        })
    );
}

#[test]
fn test_passenger_times_out_after_car_parks() {
    // Arrange: ada's call is overwritten, so the car serves floor 2 and parks for good
    let config = fast_config("");
    let (fsm, handle) = build(&config.elevator);
    let passenger = Passenger::new(
        &PassengerConfig {
            name: "ada".to_string(),
            origin: 5,
            destination: 8,
            start_delay_ms: 0,
        },
        Duration::from_millis(5),
        60,
    );
    let rider_handle = handle.clone();
    let rider = spawn(move || passenger.ride(&rider_handle));
    sleep(Duration::from_millis(20));
    handle.request_elevator(2, Down).unwrap();

    // Act
    let shutdown = spawn(move || fsm.run()).join().unwrap();
    let result = rider.join().unwrap();

    // Assert: the budget runs out as a timeout, not as a controller error
    assert_eq!(shutdown, Shutdown::IdleTimeout);
    assert!(!handle.is_running());
    assert_eq!(
        result,
        Err(PassengerError::ClientTimeout {
            passenger: "ada".to_string(),
            stage: Stage::Boarding,
            polls: 60,
        })
    );
}

#[test]
fn test_passenger_rejected_floor() {
    let config = fast_config("");
    let (_fsm, handle) = build(&config.elevator);
    let passenger = Passenger::new(
        &PassengerConfig {
            name: "dana".to_string(),
            origin: 12,
            destination: 0,
            start_delay_ms: 0,
        },
        std::time::Duration::from_millis(1),
        5,
    );

    assert!(matches!(
        passenger.ride(&handle),
        Err(PassengerError::Request(crate::shared::RequestError::InvalidFloor { .. }))
    ));
}
