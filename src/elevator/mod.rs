pub mod door;
pub mod fsm;
pub mod panels;
pub mod status;

#[cfg(test)]
mod panels_tests;

pub use door::Door;
pub use fsm::{ElevatorFSM, EmergencyStop, Shutdown, TickOutcome};
pub use panels::{CabinPanel, HallPanel};
pub use status::StatusBoard;

use crossbeam_channel as cbc;
use std::sync::Arc;

use crate::config::ElevatorConfig;
use crate::shared::{
    Behaviour, Direction, DoorState, ElevatorState, Floor, Request, RequestError,
};

/// Everything outside the controller needs: both panels, the status board and the
/// emergency stop.
#[derive(Debug, Clone)]
pub struct ElevatorHandle {
    pub hall: HallPanel,
    pub cabin: CabinPanel,
    pub status: Arc<StatusBoard>,
    pub emergency: EmergencyStop,
}

impl ElevatorHandle {
    pub fn request_elevator(&self, floor: Floor, direction: Direction) -> Result<(), RequestError> {
        self.hall.request_elevator(floor, direction)
    }

    pub fn select_floor(&self, floor: Floor) -> Result<(), RequestError> {
        self.cabin.select_floor(floor)
    }

    pub fn emergency_stop(&self) {
        self.emergency.trigger();
    }

    pub fn current_floor(&self) -> Floor {
        self.status.current_floor()
    }

    pub fn door_state(&self) -> DoorState {
        self.status.door_state()
    }

    pub fn state(&self) -> Behaviour {
        self.status.behaviour()
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }
}

/// Wires a controller to its panels through a bounded request channel.
pub fn build(config: &ElevatorConfig) -> (ElevatorFSM, ElevatorHandle) {
    let (request_tx, request_rx) = cbc::bounded::<Request>(config.request_queue_capacity);
    let status = Arc::new(StatusBoard::new(ElevatorState::new(config.start_floor())));
    let emergency = EmergencyStop::new();
    let range = config.floor_range();

    let fsm = ElevatorFSM::new(config, request_rx, status.clone(), emergency.clone());
    let handle = ElevatorHandle {
        hall: HallPanel::new(range, request_tx.clone()),
        cabin: CabinPanel::new(range, request_tx),
        status,
        emergency,
    };
    (fsm, handle)
}
