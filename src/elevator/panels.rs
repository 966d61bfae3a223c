use crossbeam_channel as cbc;
use log::debug;

use crate::shared::{Direction, Floor, FloorRange, HallCall, Request, RequestError};

/**
 * Button panels.
 *
 * Both panels validate the floor against the serviced range before anything reaches
 * the controller, then hand the request over through the controller's bounded request
 * channel. Panels are cheap to clone; every passenger can hold their own.
 *
 * # Errors
 * - `InvalidFloor`:        the floor is outside the range. Never clamped.
 * - `QueueFull`:           the request channel is at capacity.
 * - `ControllerStopped`:   the controller has exited and dropped its receiver.
 */

fn post(request_tx: &cbc::Sender<Request>, request: Request) -> Result<(), RequestError> {
    request_tx.try_send(request).map_err(|e| match e {
        cbc::TrySendError::Full(_) => RequestError::QueueFull,
        cbc::TrySendError::Disconnected(_) => RequestError::ControllerStopped,
    })
}

/// Call panel on the landings.
#[derive(Debug, Clone)]
pub struct HallPanel {
    range: FloorRange,
    request_tx: cbc::Sender<Request>,
}

impl HallPanel {
    pub fn new(range: FloorRange, request_tx: cbc::Sender<Request>) -> HallPanel {
        HallPanel { range, request_tx }
    }

    pub fn request_elevator(&self, floor: Floor, direction: Direction) -> Result<(), RequestError> {
        let floor = self.range.check(floor)?;
        debug!("Hall call at floor {} going {}", floor, direction);
        post(&self.request_tx, Request::Hall(HallCall::new(floor, direction)))
    }
}

/// Destination panel inside the car.
#[derive(Debug, Clone)]
pub struct CabinPanel {
    range: FloorRange,
    request_tx: cbc::Sender<Request>,
}

impl CabinPanel {
    pub fn new(range: FloorRange, request_tx: cbc::Sender<Request>) -> CabinPanel {
        CabinPanel { range, request_tx }
    }

    pub fn select_floor(&self, floor: Floor) -> Result<(), RequestError> {
        let floor = self.range.check(floor)?;
        debug!("Cabin selection {}", floor);
        post(&self.request_tx, Request::Cabin(floor))
    }
}
