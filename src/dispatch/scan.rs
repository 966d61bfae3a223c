use log::debug;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use crate::dispatch::{Decision, RequestBook};
use crate::shared::{Direction, Floor, HallCall, Request};

/// Sweeping request book. Calls are kept per floor and per direction and served in
/// travel order; the car only reverses once nothing is left ahead of it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanBook {
    up: BTreeSet<Floor>,
    down: BTreeSet<Floor>,
    cabin: BTreeSet<Floor>,
}

fn nearest_ahead(set: &BTreeSet<Floor>, current: Floor, direction: Direction) -> Option<Floor> {
    match direction {
        Direction::Up => set.range((Excluded(current), Unbounded)).next().copied(),
        Direction::Down => set.range(..current).next_back().copied(),
    }
}

fn farthest_ahead(set: &BTreeSet<Floor>, current: Floor, direction: Direction) -> Option<Floor> {
    match direction {
        Direction::Up => set.range((Excluded(current), Unbounded)).next_back().copied(),
        Direction::Down => set.range(..current).next().copied(),
    }
}

fn closest(current: Floor, a: Option<Floor>, b: Option<Floor>) -> Option<Floor> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.abs_diff(current) <= b.abs_diff(current) { a } else { b }),
        (a, b) => a.or(b),
    }
}

impl ScanBook {
    pub fn new() -> ScanBook {
        ScanBook::default()
    }

    fn hall_set(&self, direction: Direction) -> &BTreeSet<Floor> {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    fn hall_set_mut(&mut self, direction: Direction) -> &mut BTreeSet<Floor> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    fn sets(&self) -> [&BTreeSet<Floor>; 3] {
        [&self.up, &self.down, &self.cabin]
    }

    pub fn requests_ahead(&self, current: Floor, direction: Direction) -> bool {
        self.sets()
            .iter()
            .any(|set| nearest_ahead(set, current, direction).is_some())
    }

    /// First floor the car would open its doors at when sweeping in `direction`.
    ///
    /// Cabin destinations and calls in the sweep direction are taken on the way. When
    /// there are none, the sweep runs to the farthest pending floor and turns there.
    pub fn next_stop(&self, current: Floor, direction: Direction) -> Option<Floor> {
        let on_the_way = closest(
            current,
            nearest_ahead(&self.cabin, current, direction),
            nearest_ahead(self.hall_set(direction), current, direction),
        );
        on_the_way.or_else(|| {
            self.sets()
                .iter()
                .filter_map(|set| farthest_ahead(set, current, direction))
                .max_by_key(|floor| floor.abs_diff(current))
        })
    }

    fn stops_here(&self, current: Floor, sweep: Option<Direction>) -> bool {
        if self.cabin.contains(&current) {
            return true;
        }
        match sweep {
            None => self.up.contains(&current) || self.down.contains(&current),
            Some(direction) => {
                self.hall_set(direction).contains(&current)
                    || (self.hall_set(direction.reverse()).contains(&current)
                        && !self.requests_ahead(current, direction))
            }
        }
    }

    /// Direction of the closest pending floor. Ties go up.
    fn nearest_direction(&self, current: Floor) -> Direction {
        let above = self
            .sets()
            .iter()
            .filter_map(|set| nearest_ahead(set, current, Direction::Up))
            .min();
        let below = self
            .sets()
            .iter()
            .filter_map(|set| nearest_ahead(set, current, Direction::Down))
            .max();
        match (above, below) {
            (Some(a), Some(b)) if b.abs_diff(current) < a.abs_diff(current) => Direction::Down,
            (None, Some(_)) => Direction::Down,
            _ => Direction::Up,
        }
    }
}

impl RequestBook for ScanBook {
    fn record_hall(&mut self, call: HallCall) {
        if !self.hall_set_mut(call.direction).insert(call.floor) {
            debug!("Hall call at floor {} ({}) already pending", call.floor, call.direction);
        }
    }

    fn record_cabin(&mut self, floor: Floor) {
        self.cabin.insert(floor);
    }

    fn reconcile(&mut self) {}

    fn decide(&self, current: Floor, direction: Option<Direction>) -> Decision {
        if self.stops_here(current, direction) {
            return Decision::OpenDoorsHere;
        }

        let preferred = direction.unwrap_or_else(|| self.nearest_direction(current));
        for direction in [preferred, preferred.reverse()] {
            if let Some(target) = self.next_stop(current, direction) {
                return Decision::MoveToward { target, direction };
            }
        }
        Decision::Idle
    }

    fn serve(&mut self, floor: Floor, direction: Option<Direction>) -> Vec<Request> {
        let mut served = Vec::new();
        if self.cabin.remove(&floor) {
            served.push(Request::Cabin(floor));
        }
        match direction {
            None => {
                for direction in [Direction::Up, Direction::Down] {
                    if self.hall_set_mut(direction).remove(&floor) {
                        served.push(Request::Hall(HallCall::new(floor, direction)));
                    }
                }
            }
            Some(direction) => {
                if self.hall_set_mut(direction).remove(&floor) {
                    served.push(Request::Hall(HallCall::new(floor, direction)));
                }
                let turning = !self.requests_ahead(floor, direction);
                if turning && self.hall_set_mut(direction.reverse()).remove(&floor) {
                    served.push(Request::Hall(HallCall::new(floor, direction.reverse())));
                }
            }
        }
        served
    }

    fn has_pending(&self) -> bool {
        self.sets().iter().any(|set| !set.is_empty())
    }
}
