/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::RequestError;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type Floor = i32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Signed single-floor step in this direction.
    pub fn step(self) -> Floor {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    Closed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Behaviour {
    Idle,
    Moving,
    Stopped,
}

/// A call made from a landing: the floor it was made on and the way the rider wants to go.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallCall {
    pub floor: Floor,
    pub direction: Direction,
}

impl HallCall {
    pub fn new(floor: Floor, direction: Direction) -> HallCall {
        HallCall { floor, direction }
    }
}

/// Message carried from the panels to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Hall(HallCall),
    Cabin(Floor),
}

/// Closed interval of floors the car is allowed to visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRange {
    pub min: Floor,
    pub max: Floor,
}

impl FloorRange {
    pub fn new(min: Floor, max: Floor) -> FloorRange {
        FloorRange { min, max }
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.min <= floor && floor <= self.max
    }

    /// Rejects floors outside the interval. Never clamps.
    pub fn check(&self, floor: Floor) -> Result<Floor, RequestError> {
        if self.contains(floor) {
            Ok(floor)
        } else {
            Err(RequestError::InvalidFloor {
                floor,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Snapshot published by the controller after every tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorState {
    pub tick: u64,
    pub floor: Floor,
    pub direction: Option<Direction>,
    pub door: DoorState,
    pub behaviour: Behaviour,
    pub running: bool,
}

impl ElevatorState {
    pub fn new(floor: Floor) -> ElevatorState {
        ElevatorState {
            tick: 0,
            floor,
            direction: None,
            door: DoorState::Closed,
            behaviour: Behaviour::Idle,
            running: true,
        }
    }

    /// True when a rider standing at `floor` can step in or out.
    pub fn is_open_at(&self, floor: Floor) -> bool {
        self.floor == floor && self.door == DoorState::Open
    }
}
