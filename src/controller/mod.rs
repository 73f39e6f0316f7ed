pub mod controller;
pub mod controller_tests;

pub use controller::next_floor_label;
pub use controller::ElevatorController;
