use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ElevatorConfig;
use crate::dispatch::{Decision, RequestBook};
use crate::elevator::door::Door;
use crate::elevator::status::StatusBoard;
use crate::shared::{Behaviour, Direction, DoorState, ElevatorState, Floor, FloorRange, Request};

/**
 * Runs the elevator car.
 *
 * The `ElevatorFSM` is the only owner of the car's position, direction, door and
 * behaviour. Each tick it drains the request channel into its request book, lets the
 * book decide the next action, applies it and publishes a snapshot. One tick moves the
 * car one floor and counts one unit of dwell or idle time.
 *
 * # Fields
 * - `request_rx`:          Receives hall calls and cabin selections from the panels.
 * - `status`:              Board the snapshot is published to after every tick.
 * - `state_tx`:            Optional subscriber that receives every snapshot.
 * - `emergency`:           Flag checked at the start of every tick.
 * - `book`:                Pending requests and the dispatch policy working on them.
 * - `door_opening`:        Set when the car has stopped; the door opens on the next tick.
 * - `idle_ticks`:          Consecutive Idle ticks with nothing pending.
 * - `dwell_ticks`:         Consecutive Stopped ticks with nothing to do.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    IdleTimeout,
    EmergencyStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Halted(Shutdown),
}

/// Cloneable trigger for the emergency stop. Triggering more than once has no further effect.
#[derive(Debug, Clone, Default)]
pub struct EmergencyStop {
    flag: Arc<AtomicBool>,
}

impl EmergencyStop {
    pub fn new() -> EmergencyStop {
        EmergencyStop::default()
    }

    pub fn trigger(&self) {
        if !self.flag.swap(true, Ordering::SeqCst) {
            warn!("Emergency stop requested");
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct ElevatorFSM {
    // Channels and observers
    request_rx: cbc::Receiver<Request>,
    status: Arc<StatusBoard>,
    state_tx: Option<cbc::Sender<ElevatorState>>,
    emergency: EmergencyStop,

    // Private fields
    range: FloorRange,
    floor: Floor,
    direction: Option<Direction>,
    door: Door,
    behaviour: Behaviour,
    book: Box<dyn RequestBook>,
    door_opening: bool,
    idle_ticks: u32,
    dwell_ticks: u32,
    idle_shutdown_ticks: u32,
    stopped_dwell_ticks: u32,
    tick_interval: Duration,
    tick_count: u64,
    halted: Option<Shutdown>,
}

impl ElevatorFSM {
    pub fn new(
        config: &ElevatorConfig,
        request_rx: cbc::Receiver<Request>,
        status: Arc<StatusBoard>,
        emergency: EmergencyStop,
    ) -> ElevatorFSM {
        ElevatorFSM {
            request_rx,
            status,
            state_tx: None,
            emergency,
            range: config.floor_range(),
            floor: config.start_floor(),
            direction: None,
            door: Door::new(),
            behaviour: Behaviour::Idle,
            book: config.dispatch.new_book(),
            door_opening: false,
            idle_ticks: 0,
            dwell_ticks: 0,
            idle_shutdown_ticks: config.idle_shutdown_ticks,
            stopped_dwell_ticks: config.stopped_dwell_ticks,
            tick_interval: config.tick_interval(),
            tick_count: 0,
            halted: None,
        }
    }

    pub fn with_state_channel(mut self, state_tx: cbc::Sender<ElevatorState>) -> ElevatorFSM {
        self.state_tx = Some(state_tx);
        self
    }

    /// Ticks at the configured interval until idle shutdown or emergency stop.
    pub fn run(mut self) -> Shutdown {
        info!(
            "Elevator controller started at floor {} serving [{}, {}]",
            self.floor, self.range.min, self.range.max
        );
        self.publish();

        let ticker = cbc::tick(self.tick_interval);
        loop {
            let _ = ticker.recv();
            if let TickOutcome::Halted(reason) = self.tick() {
                info!("Elevator controller stopped: {:?}", reason);
                return reason;
            }
        }
    }

    /// Runs exactly one scheduling step and publishes the resulting snapshot.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(reason) = self.halted {
            return TickOutcome::Halted(reason);
        }
        self.tick_count += 1;

        let outcome = if self.emergency.is_triggered() {
            self.emergency_halt()
        } else {
            self.drain_requests();
            if self.door_opening {
                self.open_doors();
                TickOutcome::Continue
            } else {
                match self.behaviour {
                    Behaviour::Idle => self.tick_idle(),
                    Behaviour::Moving => self.tick_moving(),
                    Behaviour::Stopped => self.tick_stopped(),
                }
            }
        };

        self.check_invariants();
        self.publish();
        outcome
    }

    pub fn state(&self) -> ElevatorState {
        ElevatorState {
            tick: self.tick_count,
            floor: self.floor,
            direction: self.direction,
            door: self.door.state(),
            behaviour: self.behaviour,
            running: self.halted.is_none(),
        }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn door_state(&self) -> DoorState {
        self.door.state()
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    /// Requests the car still owes, including ones not yet drained from the channel.
    pub fn has_pending(&self) -> bool {
        self.book.has_pending() || !self.request_rx.is_empty()
    }

    fn drain_requests(&mut self) {
        for request in self.request_rx.try_iter() {
            match request {
                Request::Hall(call) if self.range.contains(call.floor) => {
                    self.book.record_hall(call)
                }
                Request::Cabin(floor) if self.range.contains(floor) => {
                    self.book.record_cabin(floor)
                }
                rejected => warn!("Dropping out-of-range request {:?}", rejected),
            }
        }
    }

    fn tick_idle(&mut self) -> TickOutcome {
        self.book.reconcile();
        match self.book.decide(self.floor, self.direction) {
            Decision::Idle => {
                self.idle_ticks += 1;
                if self.idle_ticks >= self.idle_shutdown_ticks {
                    info!(
                        "No requests for {} ticks, parking at floor {}",
                        self.idle_ticks, self.floor
                    );
                    self.halted = Some(Shutdown::IdleTimeout);
                    return TickOutcome::Halted(Shutdown::IdleTimeout);
                }
            }
            decision => {
                self.idle_ticks = 0;
                self.apply(decision);
            }
        }
        TickOutcome::Continue
    }

    fn tick_moving(&mut self) -> TickOutcome {
        let decision = self.book.decide(self.floor, self.direction);
        self.apply(decision);
        TickOutcome::Continue
    }

    fn tick_stopped(&mut self) -> TickOutcome {
        self.book.reconcile();
        match self.book.decide(self.floor, self.direction) {
            Decision::Idle => {
                self.dwell_ticks += 1;
                if self.dwell_ticks >= self.stopped_dwell_ticks {
                    self.go_idle();
                }
            }
            decision => self.apply(decision),
        }
        TickOutcome::Continue
    }

    fn apply(&mut self, decision: Decision) {
        match decision {
            Decision::MoveToward { target, direction } => self.step_toward(target, direction),
            Decision::OpenDoorsHere => self.stop_here(),
            Decision::Idle => self.go_idle(),
        }
    }

    fn step_toward(&mut self, target: Floor, direction: Direction) {
        self.door.close();
        if self.behaviour != Behaviour::Moving || self.direction != Some(direction) {
            info!(
                "{:?} -> Moving {} toward floor {}",
                self.behaviour, direction, target
            );
        }
        self.behaviour = Behaviour::Moving;
        self.direction = Some(direction);
        self.dwell_ticks = 0;

        let next = match self.floor.checked_add(direction.step()) {
            Some(next) if self.range.contains(next) => next,
            _ => {
                error!(
                    "Refusing to move {} past floor {} toward {}, parking instead",
                    direction, self.floor, target
                );
                self.go_idle();
                return;
            }
        };
        self.floor = next;
        debug!("Passing floor {}", self.floor);
    }

    fn stop_here(&mut self) {
        if self.behaviour == Behaviour::Stopped && self.door.is_open() {
            self.serve_here();
            return;
        }
        info!("{:?} -> Stopped at floor {}", self.behaviour, self.floor);
        self.behaviour = Behaviour::Stopped;
        self.door_opening = true;
        self.dwell_ticks = 0;
    }

    fn open_doors(&mut self) {
        self.door_opening = false;
        self.door.open();
        info!("Doors open at floor {}", self.floor);
        self.serve_here();
    }

    fn serve_here(&mut self) {
        for request in self.book.serve(self.floor, self.direction) {
            info!("Served {:?} at floor {}", request, self.floor);
        }
        self.dwell_ticks = 0;
    }

    fn go_idle(&mut self) {
        if self.door.close() {
            debug!("Closing doors before going idle");
        }
        if self.behaviour != Behaviour::Idle {
            info!("{:?} -> Idle at floor {}", self.behaviour, self.floor);
        }
        self.behaviour = Behaviour::Idle;
        self.direction = None;
        self.door_opening = false;
        self.idle_ticks = 0;
        self.dwell_ticks = 0;
    }

    fn emergency_halt(&mut self) -> TickOutcome {
        warn!("Emergency stop at floor {}", self.floor);
        self.door.open();
        self.behaviour = Behaviour::Stopped;
        self.door_opening = false;
        self.halted = Some(Shutdown::EmergencyStop);
        TickOutcome::Halted(Shutdown::EmergencyStop)
    }

    fn check_invariants(&self) {
        debug_assert!(self.range.contains(self.floor), "floor {} out of range", self.floor);
        debug_assert!(
            !(self.behaviour == Behaviour::Moving && self.door.is_open()),
            "moving with the door open"
        );
    }

    fn publish(&mut self) {
        let state = self.state();
        self.status.publish(state.clone());
        let disconnected = match &self.state_tx {
            Some(state_tx) => state_tx.send(state).is_err(),
            None => false,
        };
        if disconnected {
            debug!("State subscriber went away");
            self.state_tx = None;
        }
    }
}
