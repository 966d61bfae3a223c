/*
 * Unit tests for the button panels
 *
 * Tests:
 * - requests land on the channel as messages
 * - out-of-range floors are rejected, not clamped
 * - full and disconnected channels
 */

/***************************************/
/*             Unit tests              */
/***************************************/
use crossbeam_channel::{bounded, unbounded};

use crate::elevator::{CabinPanel, HallPanel};
use crate::shared::Direction::{Down, Up};
use crate::shared::{FloorRange, HallCall, Request, RequestError};

#[test]
fn test_panels_post_requests() {
    // Arrange
    let (request_tx, request_rx) = unbounded::<Request>();
    let range = FloorRange::new(-2, 4);
    let hall = HallPanel::new(range, request_tx.clone());
    let cabin = CabinPanel::new(range, request_tx);

    // Act
    hall.request_elevator(-2, Up).unwrap();
    cabin.select_floor(4).unwrap();

    // Assert
    assert_eq!(request_rx.try_recv(), Ok(Request::Hall(HallCall::new(-2, Up))));
    assert_eq!(request_rx.try_recv(), Ok(Request::Cabin(4)));
    assert!(request_rx.try_recv().is_err());
}

#[test]
fn test_panels_reject_out_of_range() {
    // Arrange
    let (request_tx, request_rx) = unbounded::<Request>();
    let range = FloorRange::new(0, 10);
    let hall = HallPanel::new(range, request_tx.clone());
    let cabin = CabinPanel::new(range, request_tx);

    // Act / Assert
    assert_eq!(
        hall.request_elevator(-2, Down),
        Err(RequestError::InvalidFloor { floor: -2, min: 0, max: 10 })
    );
    assert_eq!(
        cabin.select_floor(11),
        Err(RequestError::InvalidFloor { floor: 11, min: 0, max: 10 })
    );
    assert!(request_rx.is_empty());
}

#[test]
fn test_panels_queue_full() {
    let (request_tx, _request_rx) = bounded::<Request>(1);
    let hall = HallPanel::new(FloorRange::new(0, 3), request_tx);

    hall.request_elevator(1, Up).unwrap();
    assert_eq!(hall.request_elevator(2, Up), Err(RequestError::QueueFull));
}

#[test]
fn test_panels_controller_gone() {
    let (request_tx, request_rx) = bounded::<Request>(4);
    let cabin = CabinPanel::new(FloorRange::new(0, 3), request_tx);
    drop(request_rx);

    assert_eq!(cabin.select_floor(2), Err(RequestError::ControllerStopped));
}
