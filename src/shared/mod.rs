pub mod error;
pub mod macros;
pub mod structs;

pub use error::validate_label;
pub use error::ControllerError;
pub use structs::BankSnapshot;
pub use structs::ElevatorId;
pub use structs::ElevatorSnapshot;
pub use structs::ElevatorState;
pub use structs::FloorLabel;
pub use structs::FloorSnapshot;
