//! Dispatch policies.
//!
//! A [`RequestBook`] owns the requests the controller has accepted and decides, for a
//! given position and direction of travel, what the car should do next. Two books are
//! provided: [`SingleSlotBook`] keeps one hall call and one destination and steers by the
//! sign toward that single target, [`ScanBook`] keeps every call and sweeps through them.

pub mod scan;
pub mod single_slot;


use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::shared::{Direction, Floor, HallCall, Request};

pub use scan::ScanBook;
pub use single_slot::{decide, RequestSlot, SingleSlotBook};

/// Next action for the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Idle,
    MoveToward { target: Floor, direction: Direction },
    OpenDoorsHere,
}

/// Direction that takes the car from `current` to `target`, `None` when already there.
pub fn direction_toward(current: Floor, target: Floor) -> Option<Direction> {
    if target == current {
        None
    } else if target > current {
        Some(Direction::Up)
    } else {
        Some(Direction::Down)
    }
}

pub trait RequestBook: Send + fmt::Debug {
    fn record_hall(&mut self, call: HallCall);

    fn record_cabin(&mut self, floor: Floor);

    /// Called whenever the car is parked: Stopped with the door open, or Idle.
    fn reconcile(&mut self);

    fn decide(&self, current: Floor, direction: Option<Direction>) -> Decision;

    /// Clears what the open door at `floor` satisfies and returns it.
    fn serve(&mut self, floor: Floor, direction: Option<Direction>) -> Vec<Request>;

    fn has_pending(&self) -> bool;
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    #[default]
    SingleSlot,
    Scan,
}

impl DispatchMode {
    pub fn new_book(self) -> Box<dyn RequestBook> {
        match self {
            DispatchMode::SingleSlot => Box::new(SingleSlotBook::new()),
            DispatchMode::Scan => Box::new(ScanBook::new()),
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::SingleSlot => write!(f, "single_slot"),
            DispatchMode::Scan => write!(f, "scan"),
        }
    }
}

impl FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "single_slot" => Ok(DispatchMode::SingleSlot),
            "scan" => Ok(DispatchMode::Scan),
            other => Err(format!(
                "unknown dispatch mode '{}', expected single_slot or scan",
                other
            )),
        }
    }
}
