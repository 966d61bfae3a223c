use log::debug;

use crate::shared::DoorState;

/// Car door. Transitions are instantaneous; only the controller commands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    state: DoorState,
}

impl Door {
    pub fn new() -> Door {
        Door {
            state: DoorState::Closed,
        }
    }

    /// Returns true if the door actually moved.
    pub fn open(&mut self) -> bool {
        self.set(DoorState::Open)
    }

    pub fn close(&mut self) -> bool {
        self.set(DoorState::Closed)
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    fn set(&mut self, state: DoorState) -> bool {
        if self.state == state {
            return false;
        }
        debug!("Door {:?} -> {:?}", self.state, state);
        self.state = state;
        true
    }
}

impl Default for Door {
    fn default() -> Self {
        Door::new()
    }
}

#[cfg(test)]
mod door_tests {
    use super::*;

    #[test]
    fn test_door_starts_closed_and_toggles() {
        let mut door = Door::new();
        assert_eq!(door.state(), DoorState::Closed);

        assert!(door.open());
        assert!(!door.open());
        assert!(door.is_open());

        assert!(door.close());
        assert_eq!(door.state(), DoorState::Closed);
    }
}
