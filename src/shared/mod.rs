pub mod error;
pub mod macros;
pub mod structs;

pub use error::ConfigError;
pub use error::RequestError;
pub use structs::Behaviour;
pub use structs::Direction;
pub use structs::DoorState;
pub use structs::ElevatorState;
pub use structs::Floor;
pub use structs::FloorRange;
pub use structs::HallCall;
pub use structs::Request;
