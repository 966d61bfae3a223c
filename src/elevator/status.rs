use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::shared::{Behaviour, DoorState, ElevatorState, Floor};

/// Latest snapshot published by the controller.
///
/// Observers never touch the controller's own fields; they read from here, or block in
/// [`StatusBoard::wait_until`] until a publication satisfies them.
#[derive(Debug)]
pub struct StatusBoard {
    state: Mutex<ElevatorState>,
    changed: Condvar,
}

impl StatusBoard {
    pub fn new(initial: ElevatorState) -> StatusBoard {
        StatusBoard {
            state: Mutex::new(initial),
            changed: Condvar::new(),
        }
    }

    pub fn publish(&self, state: ElevatorState) {
        *self.state.lock() = state;
        self.changed.notify_all();
    }

    pub fn snapshot(&self) -> ElevatorState {
        self.state.lock().clone()
    }

    pub fn current_floor(&self) -> Floor {
        self.state.lock().floor
    }

    pub fn door_state(&self) -> DoorState {
        self.state.lock().door
    }

    pub fn behaviour(&self) -> Behaviour {
        self.state.lock().behaviour
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Blocks until a snapshot satisfies `predicate` or `timeout` elapses.
    ///
    /// Returns `None` on timeout, and early once the controller has stopped without the
    /// predicate holding, since no further snapshot will follow.
    pub fn wait_until<F>(&self, timeout: Duration, predicate: F) -> Option<ElevatorState>
    where
        F: Fn(&ElevatorState) -> bool,
    {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        loop {
            if predicate(&state) {
                return Some(state.clone());
            }
            if !state.running {
                return None;
            }
            if self.changed.wait_until(&mut state, deadline).timed_out() {
                return predicate(&state).then(|| state.clone());
            }
        }
    }
}
