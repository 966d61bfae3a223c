use log::{debug, warn};

use crate::dispatch::{direction_toward, Decision, RequestBook};
use crate::shared::{Direction, Floor, HallCall, Request};

/// Holds at most one pending value. Recording over an unconsumed value replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSlot<T> {
    value: Option<T>,
}

impl<T> RequestSlot<T> {
    pub fn new() -> Self {
        RequestSlot { value: None }
    }

    /// Stores `value`, handing back whatever it replaced.
    pub fn record(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    /// Reads and clears in one step.
    pub fn consume(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn peek(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        RequestSlot::new()
    }
}

/// Priority-ordered decision against a single hall call and a single destination.
///
/// 1. destination here, 2. hall call here, 3. head for the destination,
/// 4. head for the hall call, 5. nothing to do.
///
/// The hall call's requested direction is deliberately not consulted; only the sign
/// toward the active target picks the direction.
pub fn decide(current: Floor, hall: Option<HallCall>, cabin: Option<Floor>) -> Decision {
    if cabin == Some(current) {
        return Decision::OpenDoorsHere;
    }
    if let Some(call) = hall {
        if call.floor == current {
            return Decision::OpenDoorsHere;
        }
    }

    let target = cabin.or(hall.map(|call| call.floor));
    match target.and_then(|t| direction_toward(current, t).map(|d| (t, d))) {
        Some((target, direction)) => Decision::MoveToward { target, direction },
        None => Decision::Idle,
    }
}

#[derive(Debug, Default)]
pub struct SingleSlotBook {
    hall: RequestSlot<HallCall>,
    cabin: RequestSlot<Floor>,
    destination: Option<Floor>,
}

impl SingleSlotBook {
    pub fn new() -> SingleSlotBook {
        SingleSlotBook::default()
    }

    pub fn hall(&self) -> Option<HallCall> {
        self.hall.peek().copied()
    }

    pub fn destination(&self) -> Option<Floor> {
        self.destination
    }
}

impl RequestBook for SingleSlotBook {
    fn record_hall(&mut self, call: HallCall) {
        if let Some(previous) = self.hall.record(call) {
            if previous != call {
                warn!(
                    "Hall call at floor {} ({}) replaced by floor {} ({}) before it was served",
                    previous.floor, previous.direction, call.floor, call.direction
                );
            }
        }
    }

    fn record_cabin(&mut self, floor: Floor) {
        if let Some(previous) = self.cabin.record(floor) {
            if previous != floor {
                warn!(
                    "Cabin selection {} replaced by {} before it was taken",
                    previous, floor
                );
            }
        }
    }

    fn reconcile(&mut self) {
        if let Some(floor) = self.cabin.consume() {
            debug!("Taking cabin selection {} as destination", floor);
            self.destination = Some(floor);
        }
    }

    fn decide(&self, current: Floor, _direction: Option<Direction>) -> Decision {
        decide(current, self.hall(), self.destination)
    }

    fn serve(&mut self, floor: Floor, _direction: Option<Direction>) -> Vec<Request> {
        let mut served = Vec::new();
        if self.destination == Some(floor) {
            self.destination = None;
            served.push(Request::Cabin(floor));
        }
        if self.hall.peek().map(|call| call.floor) == Some(floor) {
            if let Some(call) = self.hall.consume() {
                served.push(Request::Hall(call));
            }
        }
        served
    }

    fn has_pending(&self) -> bool {
        self.hall.is_pending() || self.cabin.is_pending() || self.destination.is_some()
    }
}
