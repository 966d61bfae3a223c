//! Single-car elevator simulator.
//!
//! The controller ([`elevator::ElevatorFSM`]) owns the car and ticks at a fixed interval.
//! Passengers talk to it through the panels in [`elevator::ElevatorHandle`] and watch it
//! through the published [`elevator::StatusBoard`]. Which request the car serves next is
//! decided by a [`dispatch::RequestBook`].

pub mod config;
pub mod dispatch;
pub mod elevator;
pub mod shared;
pub mod simulation;

pub use elevator::{build, ElevatorFSM, ElevatorHandle};
pub use shared::{Behaviour, Direction, DoorState, ElevatorState};
